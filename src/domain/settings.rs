//! Tool configuration models.
//!
//! Describes the model host the LMT package is attached to and how
//! results are displayed. Loaded from a TOML file by the infrastructure layer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ModflowVersion;

/// Settings for the model the package belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model name, used for default package file names.
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Directory package files are written to.
    #[serde(default = "default_model_ws")]
    pub model_ws: PathBuf,

    /// MODFLOW variant.
    #[serde(default)]
    pub version: ModflowVersion,

    /// Emit load notices.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            model_ws: default_model_ws(),
            version: ModflowVersion::default(),
            verbose: false,
        }
    }
}

fn default_model_name() -> String {
    "modflowtest".to_string()
}

fn default_model_ws() -> PathBuf {
    PathBuf::from(".")
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Default output format: text, json, or table.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Model host settings.
    #[serde(default)]
    pub model: ModelSettings,

    /// Display settings.
    #[serde(default)]
    pub output: OutputSettings,
}

impl AppConfig {
    /// Get the default configuration directory path.
    #[must_use]
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lmt-config")
    }

    /// Get the default config file path.
    #[must_use]
    pub fn default_config_file() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }
}
