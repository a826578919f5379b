//! Implementation of the status command.
//!
//! Reports which mode the configuration selects right now, when it next
//! switches, whether a background instance is running, and what the desktop
//! currently has set for each setting. `--json` prints the same report as a
//! single JSON object for scripts.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::backend::gsettings::read_setting;
use crate::common::utils::private_path;
use crate::config::{self, Config, Setting};
use crate::core::boundary::TimeBoundary;
use crate::core::mode::{mode_for, next_switch};
use crate::io::instance::get_running_instance;
use crate::time::{RealTimeSource, TimeSource};

/// One setting: what the active profile wants and what the desktop has.
#[derive(Debug, Serialize, PartialEq)]
pub struct SettingStatus {
    pub setting: &'static str,
    /// `None` when the active profile leaves this setting alone
    pub expected: Option<String>,
    /// `None` when the current value could not be read
    pub current: Option<String>,
}

/// Snapshot printed by `autotheme status`.
#[derive(Debug, Serialize, PartialEq)]
pub struct StatusReport {
    pub now: String,
    pub mode: &'static str,
    pub dark_start: String,
    pub dark_end: String,
    /// `None` when the dark period covers the whole day
    pub next_switch: Option<String>,
    pub config_path: String,
    /// `false` when the file does not exist yet and defaults are shown
    pub config_exists: bool,
    pub running_pid: Option<u32>,
    pub settings: Vec<SettingStatus>,
}

impl StatusReport {
    /// Build the report; `read_current` supplies the desktop's current value per setting.
    pub fn build<F>(
        config: &Config,
        now: TimeBoundary,
        config_path: &Path,
        config_exists: bool,
        running_pid: Option<u32>,
        mut read_current: F,
    ) -> Self
    where
        F: FnMut(Setting) -> Option<String>,
    {
        let mode = mode_for(now, &config.time);
        let profile = config.profile(mode);

        let settings = Setting::ALL
            .into_iter()
            .map(|setting| SettingStatus {
                setting: setting.key(),
                expected: profile.get(setting).map(str::to_string),
                current: read_current(setting),
            })
            .collect();

        Self {
            now: now.to_string(),
            mode: mode.as_str(),
            dark_start: config.time.start.to_string(),
            dark_end: config.time.end.to_string(),
            next_switch: next_switch(mode, &config.time).map(|t| t.to_string()),
            config_path: private_path(config_path),
            config_exists,
            running_pid,
            settings,
        }
    }

    /// Settings whose current value differs from the active profile.
    pub fn mismatches(&self) -> impl Iterator<Item = &SettingStatus> {
        self.settings.iter().filter(|s| {
            matches!((&s.expected, &s.current), (Some(expected), Some(current)) if expected != current)
        })
    }
}

/// Handle the status command.
pub fn handle_status_command(json: bool, debug_enabled: bool) -> Result<()> {
    // Adopts the running instance's config directory
    let running = get_running_instance()?;

    let config_path = config::get_config_path()?;
    let config_exists = config_path.exists();
    let config = if config_exists {
        config::load_from_path(&config_path)?
    } else {
        Config::default()
    };

    let now = RealTimeSource.current_boundary();
    let report = StatusReport::build(
        &config,
        now,
        &config_path,
        config_exists,
        running.map(|info| info.pid),
        |setting| match read_setting(setting) {
            Ok(value) => Some(value),
            Err(e) => {
                if debug_enabled && !json {
                    log_debug!("{e}");
                }
                None
            }
        },
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report);
    }

    Ok(())
}

fn display_report(report: &StatusReport) {
    log_version!();

    log_block_start!("Mode at {}: {}", report.now, report.mode);
    match &report.next_switch {
        Some(at) => log_indented!("Next switch at {at}"),
        None => log_indented!("Dark mode stays active around the clock"),
    }
    log_indented!("Dark period: {} → {}", report.dark_start, report.dark_end);

    if report.config_exists {
        log_indented!("Config: {}", report.config_path);
    } else {
        log_indented!("Config: {} (not created yet, showing defaults)", report.config_path);
    }

    match report.running_pid {
        Some(pid) => log_block_start!("Running in background (PID: {pid})"),
        None => log_block_start!("Not running"),
    }

    log_block_start!("Current settings:");
    for status in &report.settings {
        let current = status.current.as_deref().unwrap_or("(unknown)");
        match &status.expected {
            Some(expected) if expected != current => {
                log_indented!("{}: {} (profile: {})", status.setting, current, expected)
            }
            _ => log_indented!("{}: {}", status.setting, current),
        }
    }

    if report.running_pid.is_some() && report.mismatches().next().is_some() {
        log_pipe!();
        log_info!("Some settings differ from the {} profile", report.mode);
        log_indented!("Run 'autotheme reload' to re-apply it");
    }
    log_end!();
}

/// Display detailed help for the status command (help subcommand)
pub fn display_help() {
    log_version!();
    log_block_start!("status - Show the current mode and instance state");
    log_block_start!("Usage: autotheme status [--json]");
    log_block_start!("Options:");
    log_indented!("--json  Print the report as a JSON object");
    log_block_start!("Description:");
    log_indented!("Shows the mode the configuration selects now, the time of");
    log_indented!("the next switch, the config file, the background PID and the");
    log_indented!("theme currently set for each setting.");
    log_end!();
}
