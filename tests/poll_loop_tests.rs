//! Drives the poll loop tick by tick with a manual clock and a recording applier.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use autotheme::backend::{ApplyError, ThemeApplier};
use autotheme::config::{self, Config, Setting};
use autotheme::core::detection::ModeChange;
use autotheme::io::signals::SignalState;
use autotheme::time::ManualTimeSource;
use autotheme::{Core, CoreParams, Mode, TickOutcome};
use tempfile::TempDir;

type Calls = Arc<Mutex<Vec<(Setting, String)>>>;

/// Applier that remembers every call and can be told to fail.
struct RecordingApplier {
    calls: Calls,
    failing: Arc<Mutex<bool>>,
}

impl ThemeApplier for RecordingApplier {
    fn apply(&mut self, setting: Setting, theme: &str) -> Result<(), ApplyError> {
        if *self.failing.lock().unwrap() {
            return Err(ApplyError::CommandMissing {
                command: "gsettings",
            });
        }
        self.calls.lock().unwrap().push((setting, theme.to_string()));
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

struct Harness {
    _dir: TempDir,
    config_path: PathBuf,
    clock: Arc<ManualTimeSource>,
    calls: Calls,
    failing: Arc<Mutex<bool>>,
    core: Core,
}

impl Harness {
    fn new(config: Config, hour: u32, minute: u32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("autotheme.toml");
        config::save_config(&config_path, &config).unwrap();

        let clock = Arc::new(ManualTimeSource::at(hour, minute));
        let calls: Calls = Arc::default();
        let failing = Arc::new(Mutex::new(false));

        let core = Core::new(CoreParams {
            applier: Box::new(RecordingApplier {
                calls: Arc::clone(&calls),
                failing: Arc::clone(&failing),
            }),
            config,
            config_path: config_path.clone(),
            signal_state: SignalState::detached(),
            time_source: Box::new(Arc::clone(&clock)),
            debug_enabled: false,
            lock: None,
        });

        Self {
            _dir: dir,
            config_path,
            clock,
            calls,
            failing,
            core,
        }
    }

    fn take_calls(&self) -> Vec<(Setting, String)> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    fn rewrite_config(&self, config: &Config) {
        config::save_config(&self.config_path, config).unwrap();
    }
}

fn themes_for(config: &Config, mode: Mode) -> Vec<(Setting, String)> {
    config
        .profile(mode)
        .entries()
        .map(|(setting, theme)| (setting, theme.to_string()))
        .collect()
}

fn write_raw(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_first_tick_applies_profile_in_setting_order() {
    let config = Config::default();
    let mut harness = Harness::new(config.clone(), 23, 30);

    let outcome = harness.core.tick();
    assert_eq!(
        outcome,
        TickOutcome::Applied {
            mode: Mode::Dark,
            change: ModeChange::Initial,
            failures: 0
        }
    );
    assert_eq!(harness.take_calls(), themes_for(&config, Mode::Dark));
}

#[test]
fn test_consecutive_ticks_in_same_mode_apply_once() {
    let mut harness = Harness::new(Config::default(), 12, 0);

    harness.core.tick();
    assert_eq!(harness.take_calls().len(), 4);

    for _ in 0..5 {
        harness.clock.advance(std::time::Duration::from_secs(30));
        assert_eq!(harness.core.tick(), TickOutcome::Unchanged);
    }
    assert!(harness.take_calls().is_empty());
}

#[test]
fn test_morning_boundary_switches_to_light() {
    let config = Config::default();
    let mut harness = Harness::new(config.clone(), 8, 59);

    harness.core.tick();
    assert_eq!(harness.take_calls(), themes_for(&config, Mode::Dark));

    harness.clock.set_time(9, 0);
    assert_eq!(
        harness.core.tick(),
        TickOutcome::Applied {
            mode: Mode::Light,
            change: ModeChange::Switched {
                from: Mode::Dark,
                to: Mode::Light
            },
            failures: 0
        }
    );
    assert_eq!(harness.take_calls(), themes_for(&config, Mode::Light));
}

#[test]
fn test_edited_boundaries_apply_without_restart() {
    let config = Config::default();
    let mut harness = Harness::new(config.clone(), 20, 0);

    harness.core.tick();
    assert_eq!(harness.core.observed_mode(), Some(Mode::Light));
    harness.take_calls();

    // Move the dark period so that 20:00 is inside it
    let mut edited = config.clone();
    edited.time.start = "19:30".parse().unwrap();
    harness.rewrite_config(&edited);

    harness.clock.advance(std::time::Duration::from_secs(30));
    assert!(matches!(
        harness.core.tick(),
        TickOutcome::Applied {
            mode: Mode::Dark,
            change: ModeChange::Switched { .. },
            ..
        }
    ));
    assert_eq!(harness.take_calls(), themes_for(&edited, Mode::Dark));
    assert_eq!(harness.core.config(), &edited);
}

#[test]
fn test_edited_themes_are_reapplied_in_same_mode() {
    let config = Config::default();
    let mut harness = Harness::new(config.clone(), 12, 0);
    harness.core.tick();
    harness.take_calls();

    let mut edited = config.clone();
    edited.light.icons = Some("Papirus".to_string());
    edited.light.desktop = None;
    harness.rewrite_config(&edited);

    assert!(matches!(
        harness.core.tick(),
        TickOutcome::Applied {
            mode: Mode::Light,
            change: ModeChange::ConfigChanged,
            ..
        }
    ));
    let calls = harness.take_calls();
    assert!(calls.contains(&(Setting::Icons, "Papirus".to_string())));
    assert!(!calls.iter().any(|(setting, _)| *setting == Setting::Desktop));
}

#[test]
fn test_broken_config_keeps_last_good_one() {
    let config = Config::default();
    let mut harness = Harness::new(config.clone(), 12, 0);
    harness.core.tick();
    harness.take_calls();

    write_raw(&harness.config_path, "[time]\nstart = \"25:00\"\n");
    assert_eq!(harness.core.tick(), TickOutcome::Unchanged);
    assert!(harness.core.config_is_stale());
    assert_eq!(harness.core.config(), &config);

    // The last good configuration still drives the evening switch
    harness.clock.set_time(22, 0);
    assert!(matches!(
        harness.core.tick(),
        TickOutcome::Applied { mode: Mode::Dark, .. }
    ));
    assert_eq!(harness.take_calls(), themes_for(&config, Mode::Dark));

    harness.rewrite_config(&config);
    assert_eq!(harness.core.tick(), TickOutcome::Unchanged);
    assert!(!harness.core.config_is_stale());
}

#[test]
fn test_missing_config_file_keeps_last_good_one() {
    let mut harness = Harness::new(Config::default(), 12, 0);
    std::fs::remove_file(&harness.config_path).unwrap();

    assert!(matches!(
        harness.core.tick(),
        TickOutcome::Applied { mode: Mode::Light, .. }
    ));
    assert!(harness.core.config_is_stale());
}

#[test]
fn test_failed_batch_is_retried_next_tick() {
    let config = Config::default();
    let mut harness = Harness::new(config.clone(), 12, 0);

    *harness.failing.lock().unwrap() = true;
    assert!(matches!(
        harness.core.tick(),
        TickOutcome::Failed { mode: Mode::Light, .. }
    ));
    assert_eq!(harness.core.observed_mode(), None);

    // Settings daemon came up
    *harness.failing.lock().unwrap() = false;
    assert!(matches!(
        harness.core.tick(),
        TickOutcome::Applied {
            mode: Mode::Light,
            change: ModeChange::Initial,
            ..
        }
    ));
    assert_eq!(harness.take_calls(), themes_for(&config, Mode::Light));
}

#[test]
fn test_empty_profile_still_records_transition() {
    let mut config = Config::default();
    config.light = Default::default();
    let mut harness = Harness::new(config, 12, 0);

    assert!(matches!(
        harness.core.tick(),
        TickOutcome::Applied { mode: Mode::Light, failures: 0, .. }
    ));
    assert!(harness.take_calls().is_empty());
    assert_eq!(harness.core.tick(), TickOutcome::Unchanged);
}
