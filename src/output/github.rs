//! GitHub Actions workflow commands, so records show up as annotations on
//! the pull request diff.

use std::fmt::Write;

use crate::collector::ScanError;
use crate::error::Result;

use super::{OutputFormatter, sorted};

pub struct GithubFormatter;

impl OutputFormatter for GithubFormatter {
    fn format(&self, errors: &[ScanError]) -> Result<String> {
        let mut output = String::new();
        for error in sorted(errors) {
            let mut props = Vec::new();
            if !error.file().is_empty() {
                props.push(format!("file={}", escape_property(error.file())));
            }
            if error.line() > 0 {
                props.push(format!("line={}", error.line()));
                props.push(format!("col={}", error.column()));
            }

            output.push_str("::error");
            if !props.is_empty() {
                let _ = write!(output, " {}", props.join(","));
            }
            let _ = writeln!(
                output,
                "::[{}] {}",
                error.code(),
                escape_data(error.details())
            );
        }
        Ok(output)
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
