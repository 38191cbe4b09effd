use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::detector::DetectorKind;

/// Worker count used when the configuration does not set one.
pub const DEFAULT_PARALLELISM: usize = 10;

/// Scan configuration.
///
/// Loaded from `.trojan-guard.json` (or `.toml`); every field is optional in
/// the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Root of the tree to scan.
    pub directory: PathBuf,

    /// Only files matching one of these globs are scanned (all files when
    /// empty).
    pub include: Vec<String>,

    /// Files matching any of these globs are skipped, even when included.
    pub exclude: Vec<String>,

    /// Report bidirectional control characters.
    pub detect_bidi: bool,

    /// Report every non-ASCII byte.
    pub detect_unicode: bool,

    /// Maximum number of files processed at once.
    pub parallelism: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            include: Vec::new(),
            exclude: Vec::new(),
            detect_bidi: true,
            detect_unicode: false,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl Config {
    /// Replace unset values (`parallelism = 0`, empty `directory`) with
    /// defaults.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        if self.parallelism == 0 {
            self.parallelism = DEFAULT_PARALLELISM;
        }
        if self.directory.as_os_str().is_empty() {
            self.directory = PathBuf::from(".");
        }
        self
    }

    /// Enabled detectors, always in the order bidi, unicode.
    #[must_use]
    pub fn detectors(&self) -> Vec<DetectorKind> {
        [
            (self.detect_bidi, DetectorKind::Bidi),
            (self.detect_unicode, DetectorKind::Unicode),
        ]
        .into_iter()
        .filter_map(|(enabled, kind)| enabled.then_some(kind))
        .collect()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
