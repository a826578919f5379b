//! Wall-clock time boundaries in `HH:MM` form.
//!
//! A `TimeBoundary` carries no date and no timezone. Comparisons happen within
//! a single nominal day, which is all the interval evaluator needs.

use anyhow::{Context, Result};
use chrono::Timelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBoundary {
    hour: u8,
    minute: u8,
}

impl TimeBoundary {
    /// Create a boundary, rejecting hours above 23 and minutes above 59.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            anyhow::bail!("hour must be between 0 and 23 (got {hour})");
        }
        if minute > 59 {
            anyhow::bail!("minute must be between 0 and 59 (got {minute})");
        }
        Ok(Self { hour, minute })
    }

    /// Const constructor for fixed boundaries. Out-of-range values fail to compile
    /// when used in a const context.
    pub const fn at(hour: u8, minute: u8) -> Self {
        assert!(hour < 24 && minute < 60, "time boundary out of range");
        Self { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Truncate any wall-clock time to its hour and minute.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        // Timelike guarantees hour < 24 and minute < 60
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl FromStr for TimeBoundary {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (hours, minutes) = trimmed
            .split_once(':')
            .with_context(|| format!("invalid time '{trimmed}', expected HH:MM"))?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
            anyhow::bail!("invalid time '{trimmed}', expected HH:MM");
        }

        let hour: u8 = hours
            .parse()
            .with_context(|| format!("invalid hour in '{trimmed}'"))?;
        let minute: u8 = minutes
            .parse()
            .with_context(|| format!("invalid minute in '{trimmed}'"))?;

        Self::new(hour, minute).with_context(|| format!("invalid time '{trimmed}'"))
    }
}

impl fmt::Display for TimeBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeBoundary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeBoundary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|e: anyhow::Error| {
            serde::de::Error::custom(format!("{e:#}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_parse_valid_times() {
        assert_eq!("22:00".parse::<TimeBoundary>().unwrap(), TimeBoundary::new(22, 0).unwrap());
        assert_eq!("09:05".parse::<TimeBoundary>().unwrap(), TimeBoundary::new(9, 5).unwrap());
        assert_eq!("9:05".parse::<TimeBoundary>().unwrap(), TimeBoundary::new(9, 5).unwrap());
        assert_eq!("00:00".parse::<TimeBoundary>().unwrap(), TimeBoundary::new(0, 0).unwrap());
        assert_eq!(" 23:59 ".parse::<TimeBoundary>().unwrap(), TimeBoundary::new(23, 59).unwrap());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!("24:00".parse::<TimeBoundary>().is_err());
        assert!("12:60".parse::<TimeBoundary>().is_err());
        assert!("99:99".parse::<TimeBoundary>().is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "22", "22:0", "22:000", "2200", "ab:cd", "-1:00", "22:00:00", "+9:00", "12:5 "] {
            assert!(bad.parse::<TimeBoundary>().is_err(), "'{bad}' should be rejected");
        }
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(TimeBoundary::new(9, 5).unwrap().to_string(), "09:05");
        assert_eq!(TimeBoundary::new(0, 0).unwrap().to_string(), "00:00");
    }

    #[test]
    fn test_from_time_truncates_seconds() {
        let time = NaiveTime::from_hms_opt(23, 30, 59).unwrap();
        assert_eq!(TimeBoundary::from_time(&time), TimeBoundary::new(23, 30).unwrap());
    }

    #[test]
    fn test_ordering_fields() {
        let boundary = TimeBoundary::new(7, 45).unwrap();
        assert_eq!(boundary.hour(), 7);
        assert_eq!(boundary.minute(), 45);
    }
}
