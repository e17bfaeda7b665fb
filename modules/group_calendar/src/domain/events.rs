use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Transport-agnostic domain event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarDomainEvent {
    AvailabilityUpdated {
        user_id: String,
        organization_id: String,
        at: DateTime<Utc>,
    },
    EventCreated { id: Uuid, at: DateTime<Utc> },
    EventUpdated { id: Uuid, at: DateTime<Utc> },
    EventDeleted { id: Uuid, at: DateTime<Utc> },
}
