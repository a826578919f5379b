//! Configuration loading functionality.
//!
//! Handles locating the configuration file, creating the default one on first
//! use, and parsing plus validating it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::Config;
use super::validation::validate_config;
use crate::common::constants::*;
use crate::common::utils::private_path;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
///
/// Relative paths are resolved against the current directory so the value can
/// be handed to a background instance and recorded in the lock file.
/// This can only be called once, typically at startup.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    let dir = match dir {
        Some(dir) => {
            let path = PathBuf::from(dir);
            let absolute = if path.is_absolute() {
                path
            } else {
                std::env::current_dir()
                    .context("Failed to resolve current directory")?
                    .join(path)
            };
            Some(absolute)
        }
        None => None,
    };

    CONFIG_DIR
        .set(dir)
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
/// Returns None if using the default directory.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Get the configuration file path.
///
/// `--config <dir>` wins; otherwise `$XDG_CONFIG_HOME/autotheme/autotheme.toml`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = get_custom_config_dir() {
        return Ok(custom_dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(APP_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// This function will create a default configuration file if none exists.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;
    load_or_create(&config_path)
}

/// Load the configuration at `path`, writing the default file first if it is missing.
pub fn load_or_create(path: &Path) -> Result<Config> {
    if !path.exists() {
        super::builder::create_default_config(path)
            .context("Failed to create default config during load")?;
    }

    load_from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", private_path(path)))
}

/// Load configuration from a specific path.
///
/// This version does NOT create a default config if the path doesn't exist;
/// a missing file is reported as an error so the poll loop can keep its last
/// good configuration.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found at {}", private_path(path));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    validate_config(&config)?;

    Ok(config)
}
