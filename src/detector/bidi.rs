use std::io::BufRead;

use super::{Detector, for_each_line};
use crate::collector::{ErrorCode, ScanError};

/// Reports bidirectional control characters, the building blocks of
/// "Trojan Source" attacks.
///
/// Columns count characters; an invalid UTF-8 sequence counts as one.
#[derive(Debug, Default, Clone, Copy)]
pub struct BidiDetector;

/// Returns the Unicode name of a bidirectional control character.
#[must_use]
pub const fn bidi_control_name(c: char) -> Option<&'static str> {
    let name = match c {
        '\u{061C}' => "ARABIC LETTER MARK",
        '\u{200E}' => "LEFT-TO-RIGHT MARK",
        '\u{200F}' => "RIGHT-TO-LEFT MARK",
        '\u{202A}' => "LEFT-TO-RIGHT EMBEDDING",
        '\u{202B}' => "RIGHT-TO-LEFT EMBEDDING",
        '\u{202C}' => "POP DIRECTIONAL FORMATTING",
        '\u{202D}' => "LEFT-TO-RIGHT OVERRIDE",
        '\u{202E}' => "RIGHT-TO-LEFT OVERRIDE",
        '\u{2066}' => "LEFT-TO-RIGHT ISOLATE",
        '\u{2067}' => "RIGHT-TO-LEFT ISOLATE",
        '\u{2068}' => "FIRST STRONG ISOLATE",
        '\u{2069}' => "POP DIRECTIONAL ISOLATE",
        _ => return None,
    };
    Some(name)
}

impl Detector for BidiDetector {
    fn code(&self) -> ErrorCode {
        ErrorCode::Bidi
    }

    fn detect(&self, path: &str, reader: &mut dyn BufRead) -> Vec<ScanError> {
        let mut errors = Vec::new();
        let read_error = for_each_line(path, reader, |line, bytes| {
            let text = String::from_utf8_lossy(bytes);
            for (column, c) in (1..).zip(text.chars()) {
                if let Some(name) = bidi_control_name(c) {
                    errors.push(ScanError::new(
                        ErrorCode::Bidi,
                        format!(
                            "BIDI control character U+{:04X} ({name}) found",
                            u32::from(c)
                        ),
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
