//! Configuration schema types for `remap.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rect::Origin;
use crate::remap::RemapOptions;

/// Where mapping documents live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingsConfig {
    /// Directory searched for `<name>.json`
    #[serde(default = "default_mappings_dir")]
    pub dir: PathBuf,
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self { dir: default_mappings_dir() }
    }
}

fn default_mappings_dir() -> PathBuf {
    PathBuf::from("mappings")
}

/// Coordinate conventions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemapSection {
    /// Origin of rects in mapping documents
    #[serde(default = "default_rect_origin")]
    pub rect_origin: Origin,
    /// Row order of input and output images
    #[serde(default = "default_pixel_origin")]
    pub pixel_origin: Origin,
}

impl Default for RemapSection {
    fn default() -> Self {
        Self { rect_origin: default_rect_origin(), pixel_origin: default_pixel_origin() }
    }
}

fn default_rect_origin() -> Origin {
    Origin::BottomLeft
}

fn default_pixel_origin() -> Origin {
    Origin::TopLeft
}

/// Root of `remap.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemapConfig {
    #[serde(default)]
    pub mappings: MappingsConfig,
    #[serde(default)]
    pub remap: RemapSection,
}

/// A single config validation problem
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl RemapConfig {
    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        if self.mappings.dir.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "mappings.dir".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        errors
    }

    pub fn remap_options(&self) -> RemapOptions {
        RemapOptions { rect_origin: self.remap.rect_origin, pixel_origin: self.remap.pixel_origin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RemapConfig::default();
        assert_eq!(config.mappings.dir, PathBuf::from("mappings"));
        assert_eq!(config.remap.rect_origin, Origin::BottomLeft);
        assert_eq!(config.remap.pixel_origin, Origin::TopLeft);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
            [mappings]
            dir = "assets/maps"

            [remap]
            rect_origin = "top-left"
            pixel_origin = "bottom-left"
        "#;
        let config: RemapConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.mappings.dir, PathBuf::from("assets/maps"));
        assert_eq!(
            config.remap_options(),
            RemapOptions { rect_origin: Origin::TopLeft, pixel_origin: Origin::BottomLeft }
        );
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config: RemapConfig = toml::from_str("[remap]\nrect_origin = \"top-left\"\n").unwrap();
        assert_eq!(config.mappings, MappingsConfig::default());
        assert_eq!(config.remap.pixel_origin, Origin::TopLeft);
    }

    #[test]
    fn test_unknown_origin_rejected() {
        let result: Result<RemapConfig, _> = toml::from_str("[remap]\nrect_origin = \"center\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_dir_invalid() {
        let config: RemapConfig = toml::from_str("[mappings]\ndir = \"\"\n").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "mappings.dir: must not be empty");
    }
}
