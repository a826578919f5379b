//! Backend abstraction layer for applying desktop theme settings.
//!
//! The poll loop hands each `(setting, theme)` pair of a profile to a
//! [`ThemeApplier`]. The production implementation shells out to `gsettings`
//! against the Cinnamon schemas; tests substitute recording or mocked appliers.
//!
//! ## Failure model
//!
//! Every call reports its own [`ApplyError`]. The caller logs it and carries on
//! with the rest of the profile, so one missing theme never blocks the others.

use anyhow::Result;
use std::fmt;

use crate::config::Setting;

pub mod gsettings;

/// Trait for backends that can write one desktop appearance setting.
#[cfg_attr(test, mockall::automock)]
pub trait ThemeApplier {
    /// Set `setting` to the theme named `theme`.
    fn apply(&mut self, setting: Setting, theme: &str) -> Result<(), ApplyError>;

    /// Get a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;
}

/// Why a single setting could not be applied.
#[derive(Debug)]
pub enum ApplyError {
    /// The settings tool is not installed or not on PATH.
    CommandMissing { command: &'static str },
    /// The settings tool ran and reported failure.
    CommandFailed {
        setting: Setting,
        status: Option<i32>,
        stderr: String,
    },
    /// Spawning or talking to the tool failed for another reason.
    Io {
        setting: Setting,
        source: std::io::Error,
    },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyError::CommandMissing { command } => write!(f, "'{command}' was not found"),
            ApplyError::CommandFailed {
                setting,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "Setting {setting} failed with exit code {code}")?,
                    None => write!(f, "Setting {setting} was interrupted by a signal")?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
            ApplyError::Io { setting, source } => {
                write!(f, "Setting {setting} failed: {source}")
            }
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApplyError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Create the production applier after checking that its tool is available.
pub fn create_applier(debug_enabled: bool) -> Result<Box<dyn ThemeApplier>> {
    let applier = gsettings::GsettingsApplier::new(debug_enabled)?;
    log_decorated!("Using {} backend", applier.backend_name());
    Ok(Box::new(applier))
}
