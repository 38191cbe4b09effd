use std::path::PathBuf;

use thiserror::Error;

use crate::glob::GlobError;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: GlobError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl GuardError {
    /// Short category name used as the heading of CLI error reports.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "Pattern",
            Self::Io(_) => "IO",
            Self::Json(_) => "JSON",
            Self::TomlParse(_) | Self::TomlSerialize(_) => "TOML",
            Self::ThreadPool(_) => "Runtime",
        }
    }

    /// Underlying cause, when there is one worth printing.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::FileRead { source, .. } => Some(source.to_string()),
            Self::InvalidPattern { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }

    /// Actionable hint for the user, if any.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::FileRead { source, .. } | Self::Io(source) => io_suggestion(source),
            Self::InvalidPattern { .. } => Some(
                "Check the glob pattern syntax: close every '[' with ']' and do not end a pattern with '\\'",
            ),
            Self::Json(_) | Self::TomlParse(_) => {
                Some("Check the configuration file syntax")
            }
            Self::Config(_) => Some("Run `trojan-guard config validate` to check your configuration"),
            _ => None,
        }
    }
}

fn io_suggestion(err: &std::io::Error) -> Option<&'static str> {
    match err.kind() {
        std::io::ErrorKind::NotFound => Some("Check that the file path exists"),
        std::io::ErrorKind::PermissionDenied => Some("Check the file permissions"),
        _ => None,
    }
}

pub type Result<T> = std::result::Result<T, GuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
