//! Trojan Source guard: finds bidirectional control characters and other
//! non-ASCII bytes that can make source code read differently from how it
//! compiles.

pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod detector;
pub mod error;
pub mod glob;
pub mod logging;
pub mod output;
pub mod path_utils;
pub mod scanner;

pub use error::{GuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ISSUES_FOUND: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
