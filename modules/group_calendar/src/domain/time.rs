//! `HH:mm` time-of-day handling.
//!
//! Times travel as 24-hour `HH:mm` strings on every external surface and as
//! minute-of-day integers inside the engine.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of one-minute slots in a day.
pub const MINUTES_PER_DAY: usize = 24 * 60;

static HHMM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("HH:mm pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time '{value}': expected HH:mm (24-hour)")]
pub struct TimeFormatError {
    pub value: String,
}

/// A minute of the day in `0..1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub const MIDNIGHT: Self = Self(0);
    pub const LAST: Self = Self(MINUTES_PER_DAY as u16 - 1);

    pub fn new(minute: u16) -> Option<Self> {
        (usize::from(minute) < MINUTES_PER_DAY).then_some(Self(minute))
    }

    /// Parse a strict `HH:mm` string (two-digit hour 00-23, two-digit minute 00-59).
    pub fn parse(s: &str) -> Result<Self, TimeFormatError> {
        let err = || TimeFormatError {
            value: s.to_string(),
        };
        let caps = HHMM.captures(s).ok_or_else(err)?;
        let hour: u16 = caps[1].parse().map_err(|_| err())?;
        let minute: u16 = caps[2].parse().map_err(|_| err())?;
        Ok(Self(hour * 60 + minute))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for MinuteOfDay {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MinuteOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MinuteOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Inclusive range of minutes; `09:00-17:00` covers minutes 540..=1020.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

impl TimeRange {
    /// `00:00-23:59`, the availability every new record starts with.
    pub const FULL_DAY: Self = Self {
        start: MinuteOfDay::MIDNIGHT,
        end: MinuteOfDay::LAST,
    };

    pub fn new(start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Self { start, end }
    }

    /// Parse both endpoints; the first malformed value is reported.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeFormatError> {
        Ok(Self {
            start: MinuteOfDay::parse(start)?,
            end: MinuteOfDay::parse(end)?,
        })
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}
