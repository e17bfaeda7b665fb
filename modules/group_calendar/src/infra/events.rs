use tracing::info;

use crate::domain::events::CalendarDomainEvent;
use crate::domain::ports::EventPublisher;

/// Publishes domain events as structured log records.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventPublisher;

impl EventPublisher<CalendarDomainEvent> for LogEventPublisher {
    fn publish(&self, event: &CalendarDomainEvent) {
        match event {
            CalendarDomainEvent::AvailabilityUpdated {
                user_id,
                organization_id,
                at,
            } => info!(%user_id, %organization_id, %at, "availability updated"),
            CalendarDomainEvent::EventCreated { id, at } => info!(%id, %at, "event created"),
            CalendarDomainEvent::EventUpdated { id, at } => info!(%id, %at, "event updated"),
            CalendarDomainEvent::EventDeleted { id, at } => info!(%id, %at, "event deleted"),
        }
    }
}
