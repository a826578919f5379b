//! Core application logic and state management.
//!
//! This module encapsulates the main logic of autotheme, the poll loop that
//! keeps the desktop on the right theme profile. It handles:
//!
//! - Re-reading the configuration on every tick
//! - Evaluating the dark period for the current time
//! - Detecting transitions and applying the active profile once per transition
//! - Signal processing (SIGUSR2 for forced re-apply, SIGTERM/SIGINT for shutdown)
//!
//! The `Core` struct maintains all runtime state, providing encapsulation
//! and making the loop easy to drive from tests.

pub mod boundary;
pub mod detection;
pub mod mode;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;

use crate::{
    backend::ThemeApplier,
    common::{constants::*, utils},
    config::{self, Config},
    core::{
        detection::{ModeChange, ObservedState, should_apply},
        mode::{Mode, mode_for, next_switch},
    },
    io::{lock::LockFile, signals::SignalMessage, signals::SignalState},
    time::TimeSource,
};

/// Parameters for creating a Core instance.
///
/// This struct bundles all the dependencies needed to create a Core,
/// following the idiomatic Rust pattern to avoid functions with too many parameters.
pub struct CoreParams {
    pub applier: Box<dyn ThemeApplier>,
    /// Configuration loaded at startup, used until a tick loads a newer one
    pub config: Config,
    /// File re-read on every tick
    pub config_path: PathBuf,
    pub signal_state: SignalState,
    pub time_source: Box<dyn TimeSource>,
    pub debug_enabled: bool,
    /// Instance lock, released on shutdown
    pub lock: Option<LockFile>,
}

/// Result of a single poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No transition; nothing was applied
    Unchanged,
    /// The profile for `mode` was applied; `failures` settings could not be set
    Applied {
        mode: Mode,
        change: ModeChange,
        failures: usize,
    },
    /// Every attempted setting failed; the observed state was kept so the next tick retries
    Failed { mode: Mode, change: ModeChange },
}

/// Core state machine managing the poll loop.
pub struct Core {
    applier: Box<dyn ThemeApplier>,
    config: Config,
    config_path: PathBuf,
    signal_state: SignalState,
    time_source: Box<dyn TimeSource>,
    debug_enabled: bool,
    lock: Option<LockFile>,
    observed: ObservedState,
    config_stale: bool,
}

impl Core {
    /// Create a new Core instance from parameters.
    ///
    /// The observed state starts unset, so the first tick always applies.
    pub fn new(params: CoreParams) -> Self {
        Self {
            applier: params.applier,
            config: params.config,
            config_path: params.config_path,
            signal_state: params.signal_state,
            time_source: params.time_source,
            debug_enabled: params.debug_enabled,
            lock: params.lock,
            observed: ObservedState::default(),
            config_stale: false,
        }
    }

    /// Execute the core application logic.
    ///
    /// Runs the poll loop until a shutdown signal arrives, then releases the lock.
    pub fn execute(mut self) -> Result<()> {
        if let Some(custom_dir) = config::get_custom_config_dir() {
            log_block_start!("Base directory: {}", utils::private_path(&custom_dir));
        }

        log_block_start!("Polling every {}s", POLL_INTERVAL.as_secs());

        self.main_loop();

        log_block_start!("Shutting down autotheme...");

        if let Some(lock) = self.lock.take()
            && let Err(e) = lock.release()
        {
            log_warning!("Failed to clean up lock file: {e}");
        }
        log_end!();

        Ok(())
    }

    /// The mode most recently applied, if any.
    pub fn observed_mode(&self) -> Option<Mode> {
        self.observed.mode
    }

    /// The configuration the loop is currently working with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the latest attempt to re-read the configuration failed.
    pub fn config_is_stale(&self) -> bool {
        self.config_stale
    }

    /// Run one poll iteration: reload config, evaluate, detect, apply.
    pub fn tick(&mut self) -> TickOutcome {
        self.reload_config();

        let now = self.time_source.current_boundary();
        let new_mode = mode_for(now, &self.config.time);

        if self.debug_enabled {
            log_pipe!();
            log_debug!(
                "Tick at {now}: {} ({} → {})",
                new_mode,
                self.config.time.start,
                self.config.time.end
            );
        }

        let change = should_apply(&self.observed, new_mode, &self.config);
        if !change.requires_apply() {
            return TickOutcome::Unchanged;
        }

        let (attempted, failures) = self.apply_profile(new_mode);

        if attempted > 0 && failures == attempted {
            log_warning!("No setting could be applied, will retry on next tick");
            return TickOutcome::Failed {
                mode: new_mode,
                change,
            };
        }

        self.observed.record(new_mode, &self.config);

        match next_switch(new_mode, &self.config.time) {
            Some(at) => log_decorated!("Next switch to {} mode at {at}", new_mode.opposite()),
            None => log_decorated!("Dark mode stays active around the clock"),
        }

        TickOutcome::Applied {
            mode: new_mode,
            change,
            failures,
        }
    }

    /// Re-read the configuration file, keeping the last good one on failure.
    fn reload_config(&mut self) {
        match config::load_from_path(&self.config_path) {
            Ok(config) => {
                if self.config_stale {
                    log_pipe!();
                    log_info!("Configuration readable again");
                }
                self.config = config;
                self.config_stale = false;
            }
            Err(e) => {
                // Only report the first failure of a streak
                if !self.config_stale {
                    log_pipe!();
                    log_warning!("Failed to reload configuration: {e:#}");
                    log_indented!("Continuing with the last valid configuration");
                }
                self.config_stale = true;
            }
        }
    }

    /// Apply every set entry of the profile for `mode`, in setting order.
    ///
    /// Returns `(attempted, failed)` counts.
    fn apply_profile(&mut self, mode: Mode) -> (usize, usize) {
        let profile = self.config.profile(mode).clone();
        if profile.is_empty() {
            log_indented!("{} profile has no settings to apply", mode.display_name());
            return (0, 0);
        }

        let mut attempted = 0;
        let mut failures = 0;

        for (setting, theme) in profile.entries() {
            attempted += 1;
            match self.applier.apply(setting, theme) {
                Ok(()) => log_indented!("{setting}: {theme}"),
                Err(e) => {
                    failures += 1;
                    log_pipe!();
                    log_error!("{e}");
                }
            }
        }

        (attempted, failures)
    }

    /// Run the main loop: tick, then wait up to 30s for a signal.
    fn main_loop(&mut self) {
        while self.signal_state.is_running() {
            self.tick();

            match self
                .signal_state
                .signal_receiver
                .recv_timeout(POLL_INTERVAL)
            {
                Ok(SignalMessage::Shutdown) => break,
                Ok(SignalMessage::Reload) => {
                    if self.debug_enabled {
                        log_debug!("Forcing re-apply of the active profile");
                    }
                    self.observed.clear();
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    // Unexpected: the state owns a sender
                    log_pipe!();
                    log_critical!("Signal handler disconnected unexpectedly");
                    log_indented!("Signals will no longer be processed");
                    std::thread::sleep(POLL_INTERVAL);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ApplyError, MockThemeApplier};
    use crate::config::Setting;
    use crate::time::ManualTimeSource;
    use std::sync::Arc;
    use tempfile::{TempDir, tempdir};

    fn setup(clock: &Arc<ManualTimeSource>, applier: MockThemeApplier) -> (TempDir, Core) {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("autotheme.toml");
        config::save_config(&config_path, &Config::default()).unwrap();

        let core = Core::new(CoreParams {
            applier: Box::new(applier),
            config: Config::default(),
            config_path,
            signal_state: SignalState::detached(),
            time_source: Box::new(Arc::clone(clock)),
            debug_enabled: false,
            lock: None,
        });
        (dir, core)
    }

    #[test]
    fn test_first_tick_applies_and_second_is_noop() {
        let clock = Arc::new(ManualTimeSource::at(23, 30));
        let mut applier = MockThemeApplier::new();
        // Default dark profile has four set entries, applied once
        applier.expect_apply().times(4).returning(|_, _| Ok(()));

        let (_dir, mut core) = setup(&clock, applier);

        assert!(matches!(
            core.tick(),
            TickOutcome::Applied {
                mode: Mode::Dark,
                change: ModeChange::Initial,
                failures: 0
            }
        ));
        assert_eq!(core.tick(), TickOutcome::Unchanged);
        assert_eq!(core.observed_mode(), Some(Mode::Dark));
    }

    #[test]
    fn test_partial_failure_still_records_state() {
        let clock = Arc::new(ManualTimeSource::at(12, 0));
        let mut applier = MockThemeApplier::new();
        applier.expect_apply().times(4).returning(|setting, _| {
            if setting == Setting::Icons {
                Err(ApplyError::CommandFailed {
                    setting,
                    status: Some(1),
                    stderr: "No such key".to_string(),
                })
            } else {
                Ok(())
            }
        });

        let (_dir, mut core) = setup(&clock, applier);

        assert!(matches!(
            core.tick(),
            TickOutcome::Applied {
                mode: Mode::Light,
                failures: 1,
                ..
            }
        ));
        assert_eq!(core.tick(), TickOutcome::Unchanged);
    }

    #[test]
    fn test_total_failure_retries_next_tick() {
        let clock = Arc::new(ManualTimeSource::at(12, 0));
        let mut applier = MockThemeApplier::new();
        applier
            .expect_apply()
            .times(8)
            .returning(|_, _| Err(ApplyError::CommandMissing { command: "gsettings" }));

        let (_dir, mut core) = setup(&clock, applier);

        assert!(matches!(core.tick(), TickOutcome::Failed { mode: Mode::Light, .. }));
        assert!(matches!(core.tick(), TickOutcome::Failed { mode: Mode::Light, .. }));
        assert_eq!(core.observed_mode(), None);
    }

    #[test]
    fn test_reload_then_shutdown_via_execute() {
        let clock = Arc::new(ManualTimeSource::at(10, 0));
        let mut applier = MockThemeApplier::new();
        // Initial apply plus the forced re-apply after Reload
        applier.expect_apply().times(8).returning(|_, _| Ok(()));

        let (_dir, core) = setup(&clock, applier);
        core.signal_state
            .signal_sender
            .send(SignalMessage::Reload)
            .unwrap();
        core.signal_state
            .signal_sender
            .send(SignalMessage::Shutdown)
            .unwrap();

        core.execute().unwrap();
    }
}
