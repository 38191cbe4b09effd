use std::fs;
use std::path::Path;

use crate::Result;
use crate::cli::Cli;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::GuardError;
use crate::output::ErrorOutput;

/// Load the explicit config, the discovered one, or defaults with
/// `--no-config`.
pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Write `content` to `output_path`, or to stdout unless quiet.
pub(crate) fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

pub(crate) fn report_error(err: &GuardError, cli: &Cli) {
    ErrorOutput::new(cli.color.into()).report(err);
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
