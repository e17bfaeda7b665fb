use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::{MinuteOfDay, Weekday};
use crate::domain::time::TimeFormatError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Organization id is required")]
    MissingOrganization,

    #[error("User id is required")]
    MissingUser,

    #[error("Invalid time on {day}: {source}")]
    InvalidTime {
        day: Weekday,
        #[source]
        source: TimeFormatError,
    },

    #[error("Inverted range on {day}: {start} is after {end}")]
    InvertedRange {
        day: Weekday,
        start: MinuteOfDay,
        end: MinuteOfDay,
    },

    #[error("Too many ranges on {day}: {count} (max: {max})")]
    TooManyRanges { day: Weekday, count: usize, max: usize },

    #[error("Event not found: {id}")]
    EventNotFound { id: Uuid },

    #[error("Event title cannot be empty")]
    EmptyTitle,

    #[error("Event title too long: {len} characters (max: {max})")]
    TitleTooLong { len: usize, max: usize },

    #[error("Event ends before it starts")]
    EventEndsBeforeStart,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },
}

impl DomainError {
    pub fn invalid_time(day: Weekday, source: TimeFormatError) -> Self {
        Self::InvalidTime { day, source }
    }

    pub fn inverted_range(day: Weekday, start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Self::InvertedRange { day, start, end }
    }

    pub fn too_many_ranges(day: Weekday, count: usize, max: usize) -> Self {
        Self::TooManyRanges { day, count, max }
    }

    pub fn event_not_found(id: Uuid) -> Self {
        Self::EventNotFound { id }
    }

    pub fn title_too_long(len: usize, max: usize) -> Self {
        Self::TitleTooLong { len, max }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
