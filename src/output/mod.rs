mod error_output;
mod github;
mod json;
mod progress;
mod text;

pub use error_output::ErrorOutput;
pub use github::GithubFormatter;
pub use json::JsonFormatter;
pub use progress::ScanProgress;
pub use text::{ColorMode, TextFormatter};

use crate::collector::ScanError;
use crate::error::Result;

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

/// Trait for rendering scan records into a report.
pub trait OutputFormatter {
    /// Format the records into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, errors: &[ScanError]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Github,
}

impl OutputFormat {
    /// Formatter for this format. `color` only affects text output.
    #[must_use]
    pub fn formatter(self, color: ColorMode) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(color)),
            Self::Json => Box::new(JsonFormatter),
            Self::Github => Box::new(GithubFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "github" | "gh" => Ok(Self::Github),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Records in report order: by file, line, column, then code.
#[must_use]
pub fn sorted(errors: &[ScanError]) -> Vec<&ScanError> {
    let mut sorted: Vec<&ScanError> = errors.iter().collect();
    sorted.sort();
    sorted
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
