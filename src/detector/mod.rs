mod bidi;
mod unicode;

pub use bidi::BidiDetector;
pub use unicode::UnicodeDetector;

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::collector::{ErrorCode, ScanError};

/// Inspects the content of one file.
///
/// The reader is positioned at the start of the file. Implementations read it
/// to the end and report read failures as [`ErrorCode::IoRead`] records
/// instead of returning early with an error.
pub trait Detector: Send + Sync {
    /// Code attached to the findings of this detector.
    fn code(&self) -> ErrorCode;

    fn detect(&self, path: &str, reader: &mut dyn BufRead) -> Vec<ScanError>;
}

/// Detector variants that can be enabled from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    Bidi,
    Unicode,
}

impl DetectorKind {
    #[must_use]
    pub fn build(self) -> Box<dyn Detector> {
        match self {
            Self::Bidi => Box::new(BidiDetector),
            Self::Unicode => Box::new(UnicodeDetector),
        }
    }
}

/// Feed `reader` to `visit` one line at a time, trailing `\n` included.
///
/// Lines are numbered from 1. A read failure stops the walk and is returned as
/// an [`ErrorCode::IoRead`] record pointing at the line being read.
fn for_each_line(
    path: &str,
    reader: &mut dyn BufRead,
    mut visit: impl FnMut(u64, &[u8]),
) -> Option<ScanError> {
    let mut buf = Vec::new();
    let mut line = 1;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return None,
            Ok(_) => {
                visit(line, &buf);
                line += 1;
            }
            Err(err) => {
                return Some(ScanError::new(
                    ErrorCode::IoRead,
                    err.to_string(),
                    path,
                    line,
                    0,
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
