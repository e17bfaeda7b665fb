//! Availability overlap engine.
//!
//! Pure and synchronous: folds every member's weekly ranges into a per-minute
//! coverage count for each day, then compresses the counts into ordered
//! ranges annotated with the share of participants covering them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::contract::model::{OverlapRange, OverlapResult, Weekday, WeeklyAvailability};
use crate::domain::time::{MinuteOfDay, MINUTES_PER_DAY};

/// How contiguous covered minutes are merged into output ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapMode {
    /// Split wherever the coverage count changes; every minute of a range
    /// has exactly the reported percentage.
    #[default]
    Plateau,
    /// Split only on uncovered minutes; the percentage is sampled at the
    /// first minute of each range.
    Legacy,
}

/// Coverage count per minute for a single day.
///
/// Ranges are not deduplicated per user: two overlapping ranges declared by
/// the same user both count.
#[derive(Clone)]
pub struct DayCoverage {
    counts: [u32; MINUTES_PER_DAY],
}

impl Default for DayCoverage {
    fn default() -> Self {
        Self {
            counts: [0; MINUTES_PER_DAY],
        }
    }
}

impl DayCoverage {
    /// Fold every record's ranges for `day`.
    pub fn accumulate<'a, I>(day: Weekday, records: I) -> Self
    where
        I: IntoIterator<Item = &'a WeeklyAvailability>,
    {
        let mut coverage = Self::default();
        for record in records {
            for range in record.ranges(day) {
                coverage.add(range.start, range.end);
            }
        }
        coverage
    }

    /// Count every minute in `start..=end`. Inverted ranges add nothing.
    pub fn add(&mut self, start: MinuteOfDay, end: MinuteOfDay) {
        if start > end {
            return;
        }
        for slot in &mut self.counts[start.index()..=end.index()] {
            *slot += 1;
        }
    }

    pub fn count_at(&self, minute: MinuteOfDay) -> u32 {
        self.counts[minute.index()]
    }

    /// Single left-to-right scan into ordered ranges.
    pub fn compress(&self, participants: usize, mode: OverlapMode) -> Vec<OverlapRange> {
        let mut ranges = Vec::new();
        // (first minute, count at first minute)
        let mut open: Option<(usize, u32)> = None;

        for (minute, &count) in self.counts.iter().enumerate() {
            if let Some((start, start_count)) = open {
                let breaks = match mode {
                    OverlapMode::Plateau => count != start_count,
                    OverlapMode::Legacy => count == 0,
                };
                if !breaks {
                    continue;
                }
                ranges.push(make_range(start, minute - 1, start_count, participants));
                open = None;
            }
            if count > 0 {
                open = Some((minute, count));
            }
        }

        // Still covered at 23:59: close there rather than wrapping.
        if let Some((start, start_count)) = open {
            ranges.push(make_range(start, MINUTES_PER_DAY - 1, start_count, participants));
        }
        ranges
    }
}

fn to_minute(index: usize) -> MinuteOfDay {
    u16::try_from(index)
        .ok()
        .and_then(MinuteOfDay::new)
        .unwrap_or(MinuteOfDay::LAST)
}

fn make_range(start: usize, end: usize, count: u32, participants: usize) -> OverlapRange {
    OverlapRange {
        start: to_minute(start),
        end: to_minute(end),
        percentage: percentage(count, participants),
    }
}

fn percentage(count: u32, participants: usize) -> f64 {
    if participants == 0 {
        return 0.0;
    }
    f64::from(count) / participants as f64 * 100.0
}

/// Compute the overlap of all `records` of one organization.
///
/// The participant count is the number of records. No records yields an
/// empty mapping and a zero count.
pub fn compute_overlap(records: &[WeeklyAvailability], mode: OverlapMode) -> OverlapResult {
    if records.is_empty() {
        return OverlapResult::default();
    }

    let participants = records.len();
    let overlap: BTreeMap<_, _> = Weekday::ALL
        .iter()
        .map(|&day| {
            let coverage = DayCoverage::accumulate(day, records);
            (day, coverage.compress(participants, mode))
        })
        .collect();

    OverlapResult {
        overlap,
        user_count: participants,
    }
}
