//! ISO-8601 time-of-day durations (`PT1H30M`) with a spoken form.
//!
//! Spoken durations come in from the voice front end as ISO-8601 text and go
//! back out as English ("1 hour and 30 minutes"). Only the time components
//! (hours, minutes, seconds) are supported — nobody holds their heating for
//! a calendar month.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_MINUTE: u64 = 60;

/// A non-negative duration with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HoldDuration {
    seconds: u64,
}

impl HoldDuration {
    /// Build from whole seconds.
    #[must_use]
    pub const fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Build from whole minutes.
    #[must_use]
    pub const fn from_minutes(minutes: u64) -> Self {
        Self::from_seconds(minutes * SECS_PER_MINUTE)
    }

    /// Build from whole hours.
    #[must_use]
    pub const fn from_hours(hours: u64) -> Self {
        Self::from_seconds(hours * SECS_PER_HOUR)
    }

    /// Total length in seconds.
    #[must_use]
    pub const fn in_seconds(self) -> u64 {
        self.seconds
    }

    /// Length in fractional hours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn in_hours(self) -> f64 {
        self.seconds as f64 / SECS_PER_HOUR as f64
    }

    /// Length in whole hours, truncated.
    #[must_use]
    pub const fn whole_hours(self) -> u64 {
        self.seconds / SECS_PER_HOUR
    }

    /// True for a zero-length duration.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.seconds == 0
    }

    /// Subtract, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self::from_seconds(self.seconds.saturating_sub(other.seconds))
    }

    /// English rendering with per-unit pluralization, components joined
    /// with " and ": `PT1H` → "1 hour", `PT1H30M` → "1 hour and 30 minutes".
    #[must_use]
    pub fn speak(self) -> String {
        let hours = self.seconds / SECS_PER_HOUR;
        let minutes = (self.seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
        let seconds = self.seconds % SECS_PER_MINUTE;

        let mut parts = Vec::new();
        if hours > 0 {
            parts.push(pluralize(hours, "hour"));
        }
        if minutes > 0 {
            parts.push(pluralize(minutes, "minute"));
        }
        if seconds > 0 {
            parts.push(pluralize(seconds, "second"));
        }

        if parts.is_empty() {
            return "0 seconds".to_string();
        }
        parts.join(" and ")
    }
}

fn pluralize(value: u64, unit: &str) -> String {
    if value == 1 {
        format!("1 {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

impl fmt::Display for HoldDuration {
    /// Canonical ISO-8601 form, e.g. `PT1H30M`. Zero renders as `PT0S`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds == 0 {
            return write!(f, "PT0S");
        }
        let hours = self.seconds / SECS_PER_HOUR;
        let minutes = (self.seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
        let seconds = self.seconds % SECS_PER_MINUTE;

        write!(f, "PT")?;
        if hours > 0 {
            write!(f, "{hours}H")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}M")?;
        }
        if seconds > 0 {
            write!(f, "{seconds}S")?;
        }
        Ok(())
    }
}

impl FromStr for HoldDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDuration(s.to_string());

        let rest = s
            .strip_prefix("PT")
            .or_else(|| s.strip_prefix("pt"))
            .ok_or_else(invalid)?;
        if rest.is_empty() {
            return Err(invalid());
        }

        let mut seconds = 0u64;
        let mut digits = String::new();
        for ch in rest.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                continue;
            }
            let value: u64 = digits.parse().map_err(|_| invalid())?;
            digits.clear();
            let scale = match ch.to_ascii_uppercase() {
                'H' => SECS_PER_HOUR,
                'M' => SECS_PER_MINUTE,
                'S' => 1,
                _ => return Err(invalid()),
            };
            seconds = value
                .checked_mul(scale)
                .and_then(|v| seconds.checked_add(v))
                .ok_or_else(invalid)?;
        }
        if !digits.is_empty() {
            // trailing digits without a unit designator
            return Err(invalid());
        }

        Ok(Self::from_seconds(seconds))
    }
}

impl Serialize for HoldDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HoldDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
