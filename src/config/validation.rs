//! Configuration validation functionality.
//!
//! Time boundaries are validated while parsing; this module checks the theme
//! names, which end up as arguments to an external settings tool.

use anyhow::Result;

use super::{Config, Setting};
use crate::core::mode::Mode;

/// Validate every theme name in both profiles.
pub fn validate_config(config: &Config) -> Result<()> {
    for mode in [Mode::Light, Mode::Dark] {
        for (setting, theme) in config.profile(mode).entries() {
            validate_theme_name(theme).map_err(|reason| {
                anyhow::anyhow!(
                    "{}.{} {} (got {:?})",
                    mode.as_str(),
                    setting.key(),
                    reason,
                    theme
                )
            })?;
        }
    }

    Ok(())
}

/// Check a single theme name, returning the reason it is rejected.
pub fn validate_theme_name(theme: &str) -> std::result::Result<(), &'static str> {
    if theme.trim().is_empty() {
        return Err("must not be empty");
    }
    if theme.chars().any(char::is_control) {
        return Err("must not contain control characters");
    }
    if theme.starts_with('-') {
        return Err("must not start with '-'");
    }
    Ok(())
}

/// Validate a value typed for `setting`, with a message suitable for prompts.
pub fn validate_setting_value(setting: Setting, theme: &str) -> Result<()> {
    validate_theme_name(theme)
        .map_err(|reason| anyhow::anyhow!("{} theme {}", setting.display_name(), reason))
}
