use std::io::BufRead;

use super::{Detector, for_each_line};
use crate::collector::{ErrorCode, ScanError};

/// Reports every byte outside the ASCII range.
///
/// Columns count bytes, so a multi-byte UTF-8 character yields one record per
/// byte at adjacent columns.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeDetector;

impl Detector for UnicodeDetector {
    fn code(&self) -> ErrorCode {
        ErrorCode::Unicode
    }

    fn detect(&self, path: &str, reader: &mut dyn BufRead) -> Vec<ScanError> {
        let mut errors = Vec::new();
        let read_error = for_each_line(path, reader, |line, bytes| {
            for (column, byte) in (1..).zip(bytes) {
                if !byte.is_ascii() {
                    errors.push(ScanError::new(
                        ErrorCode::Unicode,
                        format!("Non-ASCII byte 0x{byte:02X} found"),
                        path,
                        line,
                        column,
                    ));
                }
            }
        });
        errors.extend(read_error);
        errors
    }
}
