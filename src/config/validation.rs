//! Semantic checks applied after a configuration has been parsed.

use crate::config::Config;
use crate::glob;
use crate::{GuardError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if `parallelism` is 0, `directory` is empty, or a glob
/// pattern does not compile.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.parallelism == 0 {
        return Err(GuardError::Config(
            "parallelism must be at least 1".to_string(),
        ));
    }
    if config.directory.as_os_str().is_empty() {
        return Err(GuardError::Config("directory must not be empty".to_string()));
    }
    validate_glob_patterns(config)
}

fn validate_glob_patterns(config: &Config) -> Result<()> {
    for pattern in config.include.iter().chain(&config.exclude) {
        glob::compile(pattern).map_err(|source| GuardError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
