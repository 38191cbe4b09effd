use std::path::{Path, PathBuf};

use tracing::debug;

use super::Config;
use crate::error::{GuardError, Result};

/// Configuration file names searched in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".trojan-guard.json", ".trojan-guard.toml"];

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default location, falling back to
    /// `Config::default()` when no file is present.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// Loads configuration from the filesystem.
///
/// Search order in the current directory:
/// 1. `.trojan-guard.json`
/// 2. `.trojan-guard.toml`
///
/// Returns `Config::default()` if neither exists.
#[derive(Debug, Default)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// First existing config file in the current directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    pub fn discover(&self) -> Result<Option<PathBuf>> {
        let cwd = self.fs.current_dir()?;
        Ok(CONFIG_FILE_NAMES
            .iter()
            .map(|name| cwd.join(name))
            .find(|path| self.fs.exists(path)))
    }

    fn parse(path: &Path, content: &str) -> Result<Config> {
        let config: Config = if is_toml(path) {
            toml::from_str(content)?
        } else {
            serde_json::from_str(content)?
        };
        Ok(config.with_defaults())
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Config> {
        match self.discover()? {
            Some(path) => self.load_from_path(&path),
            None => {
                debug!("no configuration file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        debug!(path = %path.display(), "loading configuration");
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| GuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(path, &content)
    }
}

/// Whether `path` names a TOML file; everything else is read as JSON.
#[must_use]
pub fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
#[path = "loader_tests/mod.rs"]
mod tests;
