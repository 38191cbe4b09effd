use crate::error::{GuardError, Result};
use crate::glob::{self, Pattern};

/// Decides which files reach the detectors.
pub trait FileFilter {
    /// `relative_path` is relative to the scan root and `/`-separated.
    fn should_scan(&self, relative_path: &str) -> bool;
}

/// Include/exclude filter built from glob patterns.
///
/// A path is scanned when the include list is empty or one of its patterns
/// matches, and no exclude pattern matches. Exclusion wins.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PathFilter {
    /// Compile the include and exclude globs.
    ///
    /// # Errors
    /// Returns [`GuardError::InvalidPattern`] for the first glob that fails to
    /// compile.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile_all(include)?,
            exclude: compile_all(exclude)?,
        })
    }

    fn is_included(&self, path: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|p| p.is_match(path))
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclude.iter().any(|p| p.is_match(path))
    }
}

impl FileFilter for PathFilter {
    fn should_scan(&self, relative_path: &str) -> bool {
        !self.is_excluded(relative_path) && self.is_included(relative_path)
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            glob::compile(pattern).map_err(|source| GuardError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
