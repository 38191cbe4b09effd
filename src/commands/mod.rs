//! Subcommand implementations. Each `run_*` returns a process exit code;
//! the matching `run_*_impl` returns a `Result` for testing.

pub mod config;
pub(crate) mod context;
pub mod init;
pub mod scan;

pub use config::{run_config, run_config_show_impl, run_config_validate_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use scan::{apply_cli_overrides, run_scan, run_scan_impl};
