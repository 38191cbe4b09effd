//! Configuration model, file loading, and semantic validation.

mod loader;
mod model;
mod validation;

pub use loader::{
    CONFIG_FILE_NAMES, ConfigLoader, FileConfigLoader, FileSystem, RealFileSystem, is_toml,
};
pub use model::{Config, DEFAULT_PARALLELISM};
pub use validation::validate_config;
