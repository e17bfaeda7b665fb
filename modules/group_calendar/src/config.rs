use serde::{Deserialize, Serialize};

use crate::domain::overlap::OverlapMode;
use crate::domain::service::ServiceConfig;

/// Configuration for the group_calendar module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupCalendarConfig {
    #[serde(default)]
    pub overlap_mode: OverlapMode,
    #[serde(default = "default_reject_inverted_ranges")]
    pub reject_inverted_ranges: bool,
    #[serde(default = "default_max_ranges_per_day")]
    pub max_ranges_per_day: usize,
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
}

impl Default for GroupCalendarConfig {
    fn default() -> Self {
        Self {
            overlap_mode: OverlapMode::default(),
            reject_inverted_ranges: default_reject_inverted_ranges(),
            max_ranges_per_day: default_max_ranges_per_day(),
            max_title_length: default_max_title_length(),
        }
    }
}

impl From<&GroupCalendarConfig> for ServiceConfig {
    fn from(cfg: &GroupCalendarConfig) -> Self {
        Self {
            overlap_mode: cfg.overlap_mode,
            reject_inverted_ranges: cfg.reject_inverted_ranges,
            max_ranges_per_day: cfg.max_ranges_per_day,
            max_title_length: cfg.max_title_length,
        }
    }
}

fn default_reject_inverted_ranges() -> bool {
    true
}

fn default_max_ranges_per_day() -> usize {
    48
}

fn default_max_title_length() -> usize {
    200
}
