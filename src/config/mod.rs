//! Configuration system for autotheme.
//!
//! This module handles the TOML configuration file that defines the dark period
//! and the light and dark theme profiles, including default generation,
//! validation and atomic rewrites.
//!
//! ## Configuration Sources
//!
//! The configuration lives at `$XDG_CONFIG_HOME/autotheme/autotheme.toml`.
//! A custom directory can be selected with `--config <dir>`; the running
//! instance records that directory in its lock file so other commands follow it.
//!
//! ## Configuration Structure
//!
//! ```toml
//! [time]
//! start = "22:00"                 # Dark period start (HH:MM)
//! end = "09:00"                   # Dark period end (HH:MM)
//!
//! [light]
//! mouse_pointer = "DMZ-White"
//! applications = "Mint-Y-Blue"
//! icons = "Mint-Y-Blue"
//! desktop = "Mint-Y-Blue"
//! # window_borders = ""           # Absent keys leave that setting alone
//!
//! [dark]
//! mouse_pointer = "DMZ-White"
//! applications = "Mint-Y-Dark-Blue"
//! icons = "Mint-Y-Blue"
//! desktop = "Mint-Y-Dark-Blue"
//! ```
//!
//! The poll loop re-reads this file on every tick, so edits take effect
//! without a restart.

pub mod builder;
pub mod loading;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::constants::*;
use crate::core::boundary::TimeBoundary;
use crate::core::mode::Mode;

// Re-export public API
pub use builder::{create_default_config, render_config, save_config};
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// One desktop appearance setting that a profile can control.
///
/// The declaration order is the order in which settings are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    MousePointer,
    Applications,
    Icons,
    Desktop,
    WindowBorders,
}

impl Setting {
    /// Every setting, in application order.
    pub const ALL: [Setting; 5] = [
        Setting::MousePointer,
        Setting::Applications,
        Setting::Icons,
        Setting::Desktop,
        Setting::WindowBorders,
    ];

    /// Key used in the TOML file.
    pub fn key(&self) -> &'static str {
        match self {
            Setting::MousePointer => "mouse_pointer",
            Setting::Applications => "applications",
            Setting::Icons => "icons",
            Setting::Desktop => "desktop",
            Setting::WindowBorders => "window_borders",
        }
    }

    /// Name shown to the user, matching the Cinnamon Themes panel.
    pub fn display_name(&self) -> &'static str {
        match self {
            Setting::MousePointer => "Mouse Pointer",
            Setting::Applications => "Applications",
            Setting::Icons => "Icons",
            Setting::Desktop => "Desktop",
            Setting::WindowBorders => "Window Borders",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The dark period. Start and end may be in any order; see `core::mode::evaluate`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PeriodConfig {
    pub start: TimeBoundary,
    pub end: TimeBoundary,
}

/// Theme names applied together for one mode.
///
/// `None` means "leave this setting alone on transition".
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThemeProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse_pointer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_borders: Option<String>,
}

impl ThemeProfile {
    pub fn get(&self, setting: Setting) -> Option<&str> {
        match setting {
            Setting::MousePointer => self.mouse_pointer.as_deref(),
            Setting::Applications => self.applications.as_deref(),
            Setting::Icons => self.icons.as_deref(),
            Setting::Desktop => self.desktop.as_deref(),
            Setting::WindowBorders => self.window_borders.as_deref(),
        }
    }

    pub fn set(&mut self, setting: Setting, value: Option<String>) {
        let slot = match setting {
            Setting::MousePointer => &mut self.mouse_pointer,
            Setting::Applications => &mut self.applications,
            Setting::Icons => &mut self.icons,
            Setting::Desktop => &mut self.desktop,
            Setting::WindowBorders => &mut self.window_borders,
        };
        *slot = value;
    }

    /// Settings that carry a theme name, in application order.
    pub fn entries(&self) -> impl Iterator<Item = (Setting, &str)> + '_ {
        Setting::ALL
            .into_iter()
            .filter_map(|setting| self.get(setting).map(|value| (setting, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// Configuration structure for autotheme.
///
/// Loaded from `autotheme.toml` on every poll tick and rewritten wholesale by
/// `autotheme configure`. The poll loop never mutates it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dark period boundaries
    pub time: PeriodConfig,
    /// Profile applied outside the dark period
    #[serde(default)]
    pub light: ThemeProfile,
    /// Profile applied during the dark period
    #[serde(default)]
    pub dark: ThemeProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time: PeriodConfig {
                start: DEFAULT_DARK_START,
                end: DEFAULT_DARK_END,
            },
            light: ThemeProfile {
                mouse_pointer: Some(DEFAULT_LIGHT_MOUSE_POINTER.to_string()),
                applications: Some(DEFAULT_LIGHT_APPLICATIONS.to_string()),
                icons: Some(DEFAULT_LIGHT_ICONS.to_string()),
                desktop: Some(DEFAULT_LIGHT_DESKTOP.to_string()),
                window_borders: None,
            },
            dark: ThemeProfile {
                mouse_pointer: Some(DEFAULT_DARK_MOUSE_POINTER.to_string()),
                applications: Some(DEFAULT_DARK_APPLICATIONS.to_string()),
                icons: Some(DEFAULT_DARK_ICONS.to_string()),
                desktop: Some(DEFAULT_DARK_DESKTOP.to_string()),
                window_borders: None,
            },
        }
    }
}

impl Config {
    /// The profile that belongs to `mode`.
    pub fn profile(&self, mode: Mode) -> &ThemeProfile {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    pub fn profile_mut(&mut self, mode: Mode) -> &mut ThemeProfile {
        match mode {
            Mode::Light => &mut self.light,
            Mode::Dark => &mut self.dark,
        }
    }

    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");

        if let Ok(path) = get_config_path() {
            log_indented!("File: {}", crate::common::utils::private_path(&path));
        }

        log_indented!("Dark period: {} → {}", self.time.start, self.time.end);

        if self.time.start == self.time.end {
            log_pipe!();
            log_warning!("Dark period start and end are equal ({})", self.time.start);
            log_indented!("The dark profile will stay active around the clock");
        }

        for mode in [Mode::Light, Mode::Dark] {
            let profile = self.profile(mode);
            log_indented!("{} profile:", mode.display_name());
            for setting in Setting::ALL {
                match profile.get(setting) {
                    Some(theme) => log_indented!("  {}: {}", setting, theme),
                    None => log_indented!("  {}: (unchanged)", setting),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
