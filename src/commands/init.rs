use std::fs;
use std::path::Path;

use crate::cli::{Cli, InitArgs};
use crate::config::{Config, is_toml};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, GuardError, Result};

use super::context::report_error;

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    match run_init_impl(args) {
        Ok(()) => {
            if !cli.quiet {
                println!("Created configuration file: {}", args.output.display());
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            report_error(&e, cli);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Writes a default configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(GuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template(output_path)?)?;
    Ok(())
}

/// Default configuration, as TOML for `.toml` paths and JSON otherwise.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn generate_config_template(path: &Path) -> Result<String> {
    let config = Config::default();
    if is_toml(path) {
        Ok(toml::to_string_pretty(&config)?)
    } else {
        let mut json = serde_json::to_string_pretty(&config)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
