use std::collections::BTreeMap;

use serde::Serialize;

use crate::collector::{ErrorCode, ScanError};
use crate::error::Result;

use super::{OutputFormatter, sorted};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    errors: Vec<&'a ScanError>,
}

#[derive(Serialize)]
struct Summary {
    total: usize,
    by_code: BTreeMap<ErrorCode, usize>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, errors: &[ScanError]) -> Result<String> {
        let by_code = errors.iter().fold(BTreeMap::new(), |mut counts, e| {
            *counts.entry(e.code()).or_insert(0) += 1;
            counts
        });

        let output = JsonOutput {
            summary: Summary {
                total: errors.len(),
                by_code,
            },
            errors: sorted(errors),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
