use thiserror::Error;
use uuid::Uuid;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupCalendarError {
    #[error("Event not found: {id}")]
    NotFound { id: Uuid },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl GroupCalendarError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for GroupCalendarError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            EventNotFound { id } => Self::not_found(id),
            Database { message } => {
                tracing::error!("group_calendar storage failure: {}", message);
                Self::internal()
            }
            e @ (MissingOrganization
            | MissingUser
            | InvalidTime { .. }
            | InvertedRange { .. }
            | TooManyRanges { .. }
            | EmptyTitle
            | TitleTooLong { .. }
            | EventEndsBeforeStart
            | Validation { .. }) => Self::validation(e.to_string()),
        }
    }
}
