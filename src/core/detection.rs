//! Transition detection and logging for the poll loop.
//!
//! The loop remembers the last mode and configuration it applied. A tick only
//! leads to theme changes when one of them differs, so an already active
//! profile is never re-applied every 30 seconds.

use crate::config::Config;
use crate::core::mode::Mode;

/// What the poll loop last applied. Starts unset so the first tick always applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedState {
    pub mode: Option<Mode>,
    pub config: Option<Config>,
}

impl ObservedState {
    pub fn record(&mut self, mode: Mode, config: &Config) {
        self.mode = Some(mode);
        self.config = Some(config.clone());
    }

    /// Forget everything so the next tick applies unconditionally.
    pub fn clear(&mut self) {
        self.mode = None;
        self.config = None;
    }
}

/// Represents the type of change found by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// Same mode, same configuration
    None,
    /// Nothing applied yet in this process (or after a forced reload)
    Initial,
    /// The evaluator crossed a boundary
    Switched { from: Mode, to: Mode },
    /// Same mode, but the configuration was edited
    ConfigChanged,
}

impl ModeChange {
    pub fn requires_apply(&self) -> bool {
        !matches!(self, ModeChange::None)
    }
}

/// Compare a freshly evaluated mode and configuration against the observed state.
pub fn detect_mode_change(observed: &ObservedState, new_mode: Mode, config: &Config) -> ModeChange {
    match observed.mode {
        None => ModeChange::Initial,
        Some(from) if from != new_mode => ModeChange::Switched { from, to: new_mode },
        Some(_) if observed.config.as_ref() != Some(config) => ModeChange::ConfigChanged,
        Some(_) => ModeChange::None,
    }
}

/// Detect the change and log the announcement for it.
pub fn should_apply(observed: &ObservedState, new_mode: Mode, config: &Config) -> ModeChange {
    let change = detect_mode_change(observed, new_mode, config);
    log_mode_change(&change, new_mode);
    change
}

fn log_mode_change(change: &ModeChange, new_mode: Mode) {
    match change {
        ModeChange::None => {}
        ModeChange::Initial => {
            log_block_start!(
                "Commencing {} mode {}",
                new_mode.as_str(),
                new_mode.symbol()
            );
        }
        ModeChange::Switched { from, to } => {
            log_block_start!("Completed {} mode {}", from.as_str(), from.symbol());
            log_block_start!("Commencing {} mode {}", to.as_str(), to.symbol());
        }
        ModeChange::ConfigChanged => {
            log_block_start!("Configuration changed, re-applying {} mode", new_mode.as_str());
        }
    }
}
