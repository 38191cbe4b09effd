//! Shell-style glob patterns compiled to anchored regular expressions.
//!
//! Supported syntax:
//!
//! - `**` followed by `/` or the end of the pattern matches zero or more whole
//!   path segments
//! - `*` matches any run of characters except `/`
//! - `?` matches a single character except `/`
//! - `[...]` matches one character from a class, `[!...]` or `[^...]` one
//!   character not in it
//! - `[:name:]` inside a class is a POSIX class such as `[:alpha:]` or
//!   `[:digit:]`; an unknown name fails with [`GlobError::Regex`]
//! - `\` makes the next character literal, inside classes as well
//!
//! Everything else, `/` included, matches itself.

mod tokenizer;

use std::borrow::Cow;
use std::fmt;

use regex::Regex;
use thiserror::Error;

pub use tokenizer::TokenizerState;

#[derive(Error, Debug)]
pub enum GlobError {
    #[error("failed to match remaining string '{remaining}' from state '{state}'")]
    Syntax {
        remaining: String,
        state: TokenizerState,
    },

    #[error("failed to compile regexp '{source_regex}' from pattern '{pattern}'")]
    Regex {
        pattern: String,
        source_regex: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    glob: String,
    regex: Regex,
}

impl Pattern {
    /// Test a relative path against the pattern.
    ///
    /// Host directory separators are normalized to `/` first.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(&to_slash(path))
    }

    /// The glob this pattern was compiled from.
    #[must_use]
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// The anchored regular expression backing this pattern.
    #[must_use]
    pub fn regex(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glob)
    }
}

/// Compile a glob into a [`Pattern`].
///
/// # Errors
/// Returns [`GlobError::Syntax`] for malformed globs and [`GlobError::Regex`]
/// when the generated expression is rejected by the regex engine (e.g. `[]`).
pub fn compile(glob: &str) -> Result<Pattern, GlobError> {
    let source = format!("^{}$", tokenizer::tokenize(glob)?);
    let regex = Regex::new(&source).map_err(|e| GlobError::Regex {
        pattern: glob.to_string(),
        source_regex: source.clone(),
        source: e,
    })?;

    Ok(Pattern {
        glob: glob.to_string(),
        regex,
    })
}

fn to_slash(path: &str) -> Cow<'_, str> {
    if std::path::MAIN_SEPARATOR == '/' {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(path.replace(std::path::MAIN_SEPARATOR, "/"))
    }
}

#[cfg(test)]
#[path = "glob_tests.rs"]
mod tests;
