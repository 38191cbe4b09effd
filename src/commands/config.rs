use std::path::{Path, PathBuf};

use crate::cli::{Cli, ConfigAction, ConfigArgs, ConfigOutputFormat};
use crate::config::{Config, ConfigLoader, FileConfigLoader, validate_config};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, GuardError, Result};

use super::context::{load_config, report_error};

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    let result = match &args.action {
        ConfigAction::Validate { config } => {
            run_config_validate_impl(config.as_deref()).map(|path| {
                if !cli.quiet {
                    println!("Configuration is valid: {}", path.display());
                }
            })
        }
        ConfigAction::Show { config, format } => {
            run_config_show_impl(config.as_deref(), *format, cli.no_config)
                .map(|output| print!("{output}"))
        }
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            report_error(&e, cli);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Parses and validates a configuration file, returning the path checked.
///
/// Without an explicit path the file is discovered in the current directory.
///
/// # Errors
/// Returns an error if no file is found, it cannot be parsed, or a value is
/// invalid.
pub fn run_config_validate_impl(config_path: Option<&Path>) -> Result<PathBuf> {
    let loader = FileConfigLoader::new();
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => loader.discover()?.ok_or_else(|| {
            GuardError::Config(
                "No configuration file found (.trojan-guard.json or .trojan-guard.toml)"
                    .to_string(),
            )
        })?,
    };

    let config = loader.load_from_path(&path)?;
    validate_config(&config)?;
    Ok(path)
}

/// Renders the effective configuration.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or serialized.
pub fn run_config_show_impl(
    config_path: Option<&Path>,
    format: ConfigOutputFormat,
    no_config: bool,
) -> Result<String> {
    let config = load_config(config_path, no_config)?;
    render_config(&config, format)
}

fn render_config(config: &Config, format: ConfigOutputFormat) -> Result<String> {
    match format {
        ConfigOutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(config)?;
            json.push('\n');
            Ok(json)
        }
        ConfigOutputFormat::Toml => Ok(toml::to_string_pretty(config)?),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
