//! Interval evaluation: which profile is active at a given time of day.
//!
//! The dark period runs from `start` (inclusive) to `end` (exclusive) and may
//! wrap past midnight. Equality between two boundaries always counts as
//! "not earlier", which decides every tie deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::PeriodConfig;
use crate::core::boundary::TimeBoundary;

/// The two mutually exclusive theme modes.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    /// Returns the display name for this mode (without icon).
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Light => "Light",
            Mode::Dark => "Dark",
        }
    }

    /// Returns the icon/symbol for this mode.
    pub fn symbol(&self) -> &'static str {
        match self {
            Mode::Light => "󰖨 ",
            Mode::Dark => " ",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }
}

/// Strict "earlier than" on wall-clock boundaries; equal times are not earlier.
pub fn is_earlier(a: TimeBoundary, b: TimeBoundary) -> bool {
    if a.hour() != b.hour() {
        return a.hour() < b.hour();
    }
    a.minute() < b.minute()
}

/// Decide which mode is active at `now` for the dark period `start`..`end`.
///
/// When `start` is not earlier than `end` the period wraps past midnight, so
/// `start == end` keeps the dark profile active around the clock.
pub fn evaluate(now: TimeBoundary, start: TimeBoundary, end: TimeBoundary) -> Mode {
    let same_day = is_earlier(start, end);

    if is_earlier(now, start) {
        if same_day {
            Mode::Light
        } else if is_earlier(now, end) {
            Mode::Dark
        } else {
            Mode::Light
        }
    } else if same_day {
        if is_earlier(now, end) {
            Mode::Dark
        } else {
            Mode::Light
        }
    } else {
        Mode::Dark
    }
}

/// Convenience wrapper evaluating against a configured period.
pub fn mode_for(now: TimeBoundary, period: &PeriodConfig) -> Mode {
    evaluate(now, period.start, period.end)
}

/// The boundary at which the mode computed for `mode` next flips.
///
/// Returns `None` when start and end coincide, since the dark profile then
/// never gives way.
pub fn next_switch(mode: Mode, period: &PeriodConfig) -> Option<TimeBoundary> {
    if period.start == period.end {
        return None;
    }
    match mode {
        Mode::Dark => Some(period.end),
        Mode::Light => Some(period.start),
    }
}
