//! Configuration module
//!
//! Provides types, discovery and loading for the optional `remap.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_config_from, load_config, merge_cli_overrides, CliOverrides, ConfigError,
    CONFIG_FILE_NAME,
};
pub use schema::{ConfigValidationError, MappingsConfig, RemapConfig, RemapSection};
