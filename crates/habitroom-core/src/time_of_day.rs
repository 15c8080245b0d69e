//! Time-of-day classification and habit relevance.
//!
//! Two independent rules live here:
//!
//! - the period boundaries used to name the current part of the day
//!   (`afternoon_starts`, `evening_starts`), and
//! - the afternoon opening (`afternoon_opens`), which lets afternoon habits
//!   surface before the afternoon period begins so they can be planned ahead.
//!
//! All functions take the wall-clock time as a parameter; nothing in this
//! module reads the system clock.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Coarse part of the day derived from a clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TimeOfDay::from(*self).fmt(f)
    }
}

/// Preferred time of day declared on a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Anytime,
}

impl TimeOfDay {
    /// Every accepted token, in display order.
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Anytime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Anytime => "anytime",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "🌅",
            TimeOfDay::Afternoon => "☀️",
            TimeOfDay::Evening => "🌙",
            TimeOfDay::Anytime => "⏰",
        }
    }

    /// Capitalized name prefixed by its emoji, e.g. `🌅 Morning`.
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{} {}", self.emoji(), capitalized)
    }
}

impl From<Period> for TimeOfDay {
    fn from(period: Period) -> Self {
        match period {
            Period::Morning => TimeOfDay::Morning,
            Period::Afternoon => TimeOfDay::Afternoon,
            Period::Evening => TimeOfDay::Evening,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "anytime" => Ok(TimeOfDay::Anytime),
            _ => Err(ValidationError::InvalidTimeOfDay(s.to_string())),
        }
    }
}

/// Clock boundaries used by the classifier.
///
/// Serialized as `HH:MM` strings in the `[day]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBoundaries {
    /// First minute of the afternoon period.
    #[serde(with = "hhmm", default = "default_afternoon_starts")]
    pub afternoon_starts: NaiveTime,
    /// First minute of the evening period.
    #[serde(with = "hhmm", default = "default_evening_starts")]
    pub evening_starts: NaiveTime,
    /// When afternoon habits start being relevant.
    #[serde(with = "hhmm", default = "default_afternoon_opens")]
    pub afternoon_opens: NaiveTime,
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn default_afternoon_starts() -> NaiveTime {
    clock(13, 0)
}
fn default_evening_starts() -> NaiveTime {
    clock(17, 0)
}
fn default_afternoon_opens() -> NaiveTime {
    clock(11, 30)
}

impl Default for DayBoundaries {
    fn default() -> Self {
        Self {
            afternoon_starts: default_afternoon_starts(),
            evening_starts: default_evening_starts(),
            afternoon_opens: default_afternoon_opens(),
        }
    }
}

impl DayBoundaries {
    /// Classify a clock time. Lower bounds are inclusive.
    pub fn current_period(&self, now: NaiveTime) -> Period {
        if now < self.afternoon_starts {
            Period::Morning
        } else if now < self.evening_starts {
            Period::Afternoon
        } else {
            Period::Evening
        }
    }

    /// Whether a habit with the given preference should surface at `now`.
    pub fn is_relevant_now(&self, time_of_day: TimeOfDay, now: NaiveTime) -> bool {
        match time_of_day {
            TimeOfDay::Anytime => true,
            TimeOfDay::Morning => self.current_period(now) == Period::Morning,
            TimeOfDay::Evening => self.current_period(now) == Period::Evening,
            // Opens before the afternoon period and stays open until midnight.
            TimeOfDay::Afternoon => now >= self.afternoon_opens,
        }
    }
}

/// [`DayBoundaries::current_period`] with the default boundaries.
pub fn current_period(now: NaiveTime) -> Period {
    DayBoundaries::default().current_period(now)
}

/// [`DayBoundaries::is_relevant_now`] with the default boundaries.
pub fn is_relevant_now(time_of_day: TimeOfDay, now: NaiveTime) -> bool {
    DayBoundaries::default().is_relevant_now(time_of_day, now)
}

/// Parse a `HH:MM` clock string.
pub fn parse_clock(s: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidClockTime(s.to_string()))
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw).map_err(serde::de::Error::custom)
    }
}
