//! Time source abstraction for real and manually driven clocks.

use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

use crate::core::boundary::TimeBoundary;

/// Trait for abstracting wall-clock reads.
pub trait TimeSource: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current time truncated to a boundary (hour and minute).
    fn current_boundary(&self) -> TimeBoundary {
        TimeBoundary::from_time(&self.now())
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Real-time implementation that uses the system's local time.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to.
///
/// Share it through an `Arc` to keep a handle for advancing time while the
/// poll loop owns the other end.
#[cfg(any(test, feature = "testing-support"))]
pub struct ManualTimeSource {
    current: std::sync::Mutex<NaiveDateTime>,
}

#[cfg(any(test, feature = "testing-support"))]
impl ManualTimeSource {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            current: std::sync::Mutex::new(start),
        }
    }

    /// A clock set to `hour:minute` on a fixed date.
    pub fn at(hour: u32, minute: u32) -> Self {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("hour and minute must form a valid time of day");
        Self::new(start)
    }

    /// Move the clock to `hour:minute`, on the next day if that is not later today.
    pub fn set_time(&self, hour: u32, minute: u32) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let mut target = current
            .date()
            .and_hms_opt(hour, minute, 0)
            .expect("hour and minute must form a valid time of day");
        if target < *current {
            target += chrono::Duration::days(1);
        }
        *current = target;
    }

    pub fn advance(&self, duration: std::time::Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Ok(delta) = chrono::Duration::from_std(duration) {
            *current += delta;
        }
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for ManualTimeSource {
    fn now(&self) -> NaiveDateTime {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
