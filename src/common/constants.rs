//! Application-wide constants and default values.
//!
//! Defaults here are what a freshly created configuration file contains.

use std::time::Duration;

use crate::core::boundary::TimeBoundary;

// # Application identity

pub const APP_NAME: &str = "autotheme";
pub const CONFIG_FILE_NAME: &str = "autotheme.toml";
pub const LOCK_FILE_NAME: &str = "autotheme.lock";
pub const LOG_FILE_NAME: &str = "autotheme.log";
pub const AUTOSTART_FILE_NAME: &str = "autotheme.desktop";

// # Poll loop

/// Fixed interval between two ticks of the poll loop.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

// # Dark period defaults

pub const DEFAULT_DARK_START: TimeBoundary = TimeBoundary::at(22, 0);
pub const DEFAULT_DARK_END: TimeBoundary = TimeBoundary::at(9, 0);

// # Theme defaults (Linux Mint)

pub const DEFAULT_LIGHT_MOUSE_POINTER: &str = "DMZ-White";
pub const DEFAULT_LIGHT_APPLICATIONS: &str = "Mint-Y-Blue";
pub const DEFAULT_LIGHT_ICONS: &str = "Mint-Y-Blue";
pub const DEFAULT_LIGHT_DESKTOP: &str = "Mint-Y-Blue";

pub const DEFAULT_DARK_MOUSE_POINTER: &str = "DMZ-White";
pub const DEFAULT_DARK_APPLICATIONS: &str = "Mint-Y-Dark-Blue";
pub const DEFAULT_DARK_ICONS: &str = "Mint-Y-Blue";
pub const DEFAULT_DARK_DESKTOP: &str = "Mint-Y-Dark-Blue";

// # Process management

/// How long stop/restart wait for a terminated instance to exit
pub const STOP_TIMEOUT_MS: u64 = 3000;
/// How long start waits for a spawned instance to take the lock
pub const START_TIMEOUT_MS: u64 = 3000;
/// How long to wait for a lock holder to write its PID
pub const LOCK_CONTENTS_TIMEOUT_MS: u64 = 500;
pub const PROCESS_POLL_INTERVAL_MS: u64 = 100;

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[cfg(test)]
pub mod test_constants {
    pub const TEST_SAME_DAY_START: &str = "03:00";
    pub const TEST_SAME_DAY_END: &str = "08:00";
    pub const TEST_LIGHT_THEME: &str = "Mint-Y-Blue";
    pub const TEST_DARK_THEME: &str = "Mint-Y-Dark-Blue";
}
