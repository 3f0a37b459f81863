//! Configuration file management.
//!
//! Handles loading and creating the TOML configuration file.

use std::fs;
use std::path::Path;

use crate::domain::{AppConfig, AppError, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# lmt-config configuration
# Auto-generated - edit as needed

[model]
# Model name; package files default to <name>.<extension>
name = "modflowtest"

# Directory package files are written to
model_ws = "."

# MODFLOW variant: mf2k, mf2005, mfnwt, mfusg
version = "mf2005"

# Emit load notices
verbose = false

[output]
# Display format: text, json, table
format = "text"
"#;

/// Load configuration from `path`, or from the default location.
///
/// A missing default file yields the default configuration; a missing
/// explicit file is an error.
///
/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config_from_file(path),
        None => {
            let config_path = AppConfig::default_config_file();
            if config_path.exists() {
                load_config_from_file(&config_path)
            } else {
                tracing::debug!(path = %config_path.display(), "No config file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Create the default configuration file at `path` if it doesn't exist.
///
/// Returns `true` if a file was created.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %path.display(), "Created default configuration");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModflowVersion;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config: AppConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.model.name, "modflowtest");
        assert_eq!(config.model.version, ModflowVersion::Mf2005);
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn test_ensure_and_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        assert!(ensure_config_exists(&config_path).unwrap());
        assert!(!ensure_config_exists(&config_path).unwrap());

        let loaded = load_config(Some(config_path.as_path())).unwrap();
        assert_eq!(loaded.model.model_ws, std::path::PathBuf::from("."));
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[model]\nversion = \"mf6\"\n").unwrap();

        assert!(matches!(
            load_config_from_file(&config_path),
            Err(AppError::Config { .. })
        ));
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().unwrap();
        let result = load_config(Some(dir.path().join("absent.toml").as_path()));
        assert!(matches!(result, Err(AppError::Io { .. })));
    }
}
