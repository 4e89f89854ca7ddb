//! Configuration module for the facade layer.
//!
//! Settings are layered:
//! - Default values
//! - TOML configuration file (`.aster/settings.toml`)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `ASTER_` and use double
//! underscores to separate nested levels:
//! - `ASTER_LOGGING__LEVEL=debug` sets `logging.level`
//! - `ASTER_PREVIEW__FIELD_MARKER=//gen:field` sets `preview.field_marker`

use crate::error::{AsterError, AsterResult};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".aster";
const CONFIG_FILE: &str = "settings.toml";

/// Newest configuration schema this build understands.
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode; forces the `debug` log filter
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rendering of declaration previews
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PreviewConfig {
    /// First line of a struct field preview
    #[serde(default = "default_field_marker")]
    pub field_marker: String,

    /// Prefix of the placeholder for nodes that have no preview
    #[serde(default = "default_unpreviewable_prefix")]
    pub unpreviewable_prefix: String,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_field_marker() -> String {
    "//aster:field".to_string()
}
fn default_unpreviewable_prefix() -> String {
    "// aster: can not preview".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            logging: LoggingConfig::default(),
            preview: PreviewConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            field_marker: default_field_marker(),
            unpreviewable_prefix: default_unpreviewable_prefix(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels
            .merge(Env::prefixed("ASTER_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find `.aster/settings.toml` searching from the current directory up
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(CONFIG_FILE))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Filter directive handed to the subscriber when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.logging.level
        }
    }

    /// Rejects unknown schema versions and values that would render
    /// previews that are not comments.
    pub fn validate(&self) -> AsterResult<()> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(AsterError::ConfigError {
                reason: format!(
                    "unsupported settings version {}, expected 1..={CONFIG_VERSION}",
                    self.version
                ),
            });
        }
        let preview = &self.preview;
        for (key, value) in [
            ("preview.field_marker", &preview.field_marker),
            ("preview.unpreviewable_prefix", &preview.unpreviewable_prefix),
        ] {
            if !value.starts_with("//") {
                return Err(AsterError::ConfigError {
                    reason: format!("{key} must start with '//', got '{value}'"),
                });
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(AsterError::ConfigError {
                reason: "logging.level must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
