use std::fmt;

use serde::Serialize;

/// Category tag of a [`ScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A bidirectional control character was found.
    Bidi,
    /// A non-ASCII byte was found.
    Unicode,
    /// The directory tree could not be walked.
    IoDirectory,
    /// A file could not be opened.
    IoFile,
    /// A file could not be rewound before running a detector.
    IoSeek,
    /// A detector failed while reading a file.
    IoRead,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bidi => "BIDI",
            Self::Unicode => "UNICODE",
            Self::IoDirectory => "IO_DIRECTORY",
            Self::IoFile => "IO_FILE",
            Self::IoSeek => "IO_SEEK",
            Self::IoRead => "IO_READ",
        }
    }

    /// Whether this code reports an operational failure rather than a finding.
    #[must_use]
    pub const fn is_io(self) -> bool {
        matches!(
            self,
            Self::IoDirectory | Self::IoFile | Self::IoSeek | Self::IoRead
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding or operational failure.
///
/// Findings and failures share this shape so reports treat them uniformly.
/// `line` and `column` are 1-based, or 0 when they do not apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScanError {
    file: String,
    line: u64,
    column: u64,
    code: ErrorCode,
    details: String,
}

impl ScanError {
    #[must_use]
    pub fn new(
        code: ErrorCode,
        details: impl Into<String>,
        file: impl Into<String>,
        line: u64,
        column: u64,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            code,
            details: details.into(),
        }
    }

    /// A failure that is not tied to a position in the file.
    #[must_use]
    pub fn io(code: ErrorCode, err: &std::io::Error, file: impl Into<String>) -> Self {
        Self::new(code, err.to_string(), file, 0, 0)
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Tree-relative path, empty for directory-level failures.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[must_use]
    pub const fn line(&self) -> u64 {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> u64 {
        self.column
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.file.is_empty(), self.line) {
            (true, _) => write!(f, "{}: {}", self.code, self.details),
            (false, 0) => write!(f, "{}: {}: {}", self.file, self.code, self.details),
            (false, _) => write!(
                f,
                "{}:{}:{}: {}: {}",
                self.file, self.line, self.column, self.code, self.details
            ),
        }
    }
}
