use tracing::debug;

use crate::cli::{Cli, ScanArgs};
use crate::config::{Config, validate_config};
use crate::output::ScanProgress;
use crate::scanner::Scanner;
use crate::{EXIT_CONFIG_ERROR, EXIT_ISSUES_FOUND, EXIT_SUCCESS, Result};

use super::context::{load_config, report_error, write_output};

#[must_use]
pub fn run_scan(args: &ScanArgs, cli: &Cli) -> i32 {
    match run_scan_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            report_error(&e, cli);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Scan the configured tree and write the report.
///
/// # Errors
/// Returns an error if the configuration is invalid or the report cannot be
/// written. Problems met while scanning are part of the report instead.
pub fn run_scan_impl(args: &ScanArgs, cli: &Cli) -> Result<i32> {
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    apply_cli_overrides(&mut config, args);
    validate_config(&config)?;
    debug!(?config, "effective configuration");

    let scanner = Scanner::from_config(&config)?.with_progress(ScanProgress::new(cli.quiet));
    let errors = scanner.run().into_errors();

    let output = args.format.formatter(cli.color.into()).format(&errors)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(if errors.is_empty() {
        EXIT_SUCCESS
    } else {
        EXIT_ISSUES_FOUND
    })
}

/// Command-line values replace scalar settings and extend pattern lists.
pub fn apply_cli_overrides(config: &mut Config, args: &ScanArgs) {
    if let Some(directory) = &args.directory {
        config.directory.clone_from(directory);
    }
    config.include.extend(args.include.iter().cloned());
    config.exclude.extend(args.exclude.iter().cloned());
    if let Some(parallelism) = args.parallelism {
        config.parallelism = parallelism;
    }
    if args.detect_unicode {
        config.detect_unicode = true;
    }
    if args.no_detect_bidi {
        config.detect_bidi = false;
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
