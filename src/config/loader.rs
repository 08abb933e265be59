//! Configuration loading and discovery for `remap.toml`

use super::schema::RemapConfig;
use crate::rect::Origin;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name searched for in the working directory and its parents
pub const CONFIG_FILE_NAME: &str = "remap.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse remap.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override mappings directory
    pub mappings_dir: Option<PathBuf>,
    /// Override document rect origin
    pub rect_origin: Option<Origin>,
    /// Override image row origin
    pub pixel_origin: Option<Origin>,
}

/// Find remap.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    find_config_from(cwd)
}

/// Find remap.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a remap.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
pub fn load_config(path: Option<&Path>) -> Result<RemapConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(RemapConfig::default()),
    }
}

/// Load configuration from a specific file path.
///
/// A relative `mappings.dir` is resolved against the file's directory.
fn load_config_file(path: &Path) -> Result<RemapConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: RemapConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if config.mappings.dir.is_relative() {
        if let Some(base) = path.parent() {
            config.mappings.dir = base.join(&config.mappings.dir);
        }
    }

    Ok(config)
}

/// Apply CLI overrides to a loaded configuration.
pub fn merge_cli_overrides(config: &mut RemapConfig, overrides: &CliOverrides) {
    if let Some(ref dir) = overrides.mappings_dir {
        config.mappings.dir = dir.clone();
    }
    if let Some(origin) = overrides.rect_origin {
        config.remap.rect_origin = origin;
    }
    if let Some(origin) = overrides.pixel_origin {
        config.remap.pixel_origin = origin;
    }
}
