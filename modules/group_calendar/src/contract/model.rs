use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

pub use crate::domain::overlap::OverlapMode;
pub use crate::domain::time::{MinuteOfDay, TimeRange, TimeFormatError};

/// Day-of-week key. Ordering follows the canonical monday..sunday week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the caller, resolved by the surrounding auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerCtx {
    pub user_id: String,
    pub user_email: String,
    pub organization_id: String,
}

impl CallerCtx {
    pub fn new(
        user_id: impl Into<String>,
        user_email: impl Into<String>,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_email: user_email.into(),
            organization_id: organization_id.into(),
        }
    }
}

pub type DayRanges = BTreeMap<Weekday, Vec<TimeRange>>;

/// One user's weekly availability within one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailability {
    pub user_id: String,
    pub organization_id: String,
    pub user_email: String,
    /// Days without an entry have no availability declared.
    pub time_ranges: DayRanges,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeeklyAvailability {
    pub fn ranges(&self, day: Weekday) -> &[TimeRange] {
        self.time_ranges.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Raw, not yet validated range as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeInput {
    pub start: String,
    pub end: String,
}

impl TimeRangeInput {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Replacement set of ranges for the caller's week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub time_ranges: BTreeMap<Weekday, Vec<TimeRangeInput>>,
}

impl AvailabilityUpdate {
    pub fn with_day(mut self, day: Weekday, ranges: Vec<TimeRangeInput>) -> Self {
        self.time_ranges.insert(day, ranges);
        self
    }
}

/// A run of covered minutes annotated with the share of participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapRange {
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
    pub percentage: f64,
}

/// Per-day overlap for a whole organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResult {
    pub overlap: BTreeMap<Weekday, Vec<OverlapRange>>,
    /// Denominator of every percentage.
    pub user_count: usize,
}

impl OverlapResult {
    pub fn ranges(&self, day: Weekday) -> &[OverlapRange] {
        self.overlap.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    pub organization_id: String,
    pub created_by: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
}

/// Partial update data for an event
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub all_day: Option<bool>,
}

/// Events starting at or after `start` and ending at or before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl EventWindow {
    pub fn contains(&self, event: &CalendarEvent) -> bool {
        event.start >= self.start && event.end <= self.end
    }
}
