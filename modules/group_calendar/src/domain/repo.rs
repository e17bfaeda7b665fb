use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::{CalendarEvent, WeeklyAvailability};

/// Persistence the availability side of the domain needs.
/// Document-store semantics: one record per (user, organization), upserted whole.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn find(
        &self,
        user_id: &str,
        organization_id: &str,
    ) -> anyhow::Result<Option<WeeklyAvailability>>;

    /// All records of an organization, ordered by user id.
    async fn find_by_organization(
        &self,
        organization_id: &str,
    ) -> anyhow::Result<Vec<WeeklyAvailability>>;

    /// Insert or replace the record keyed by its (user, organization).
    async fn upsert(&self, record: WeeklyAvailability) -> anyhow::Result<()>;
}

#[async_trait]
pub trait EventsRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<CalendarEvent>>;
    /// Events of an organization lying within `[start, end]`, ordered by start.
    async fn find_in_window(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<CalendarEvent>>;
    async fn insert(&self, event: CalendarEvent) -> anyhow::Result<()>;
    async fn update(&self, event: CalendarEvent) -> anyhow::Result<()>;
    /// Returns true if an event was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
