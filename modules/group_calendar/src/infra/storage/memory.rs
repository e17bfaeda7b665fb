//! In-process document store backing the repository ports.
//!
//! Concurrent maps give per-key atomic upserts; readers get a point-in-time
//! copy of the matching records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use crate::contract::model::{CalendarEvent, EventWindow, WeeklyAvailability};
use crate::domain::repo::{AvailabilityRepository, EventsRepository};

type AvailabilityKey = (String, String);

#[derive(Default)]
pub struct InMemoryAvailabilityRepository {
    // (organization_id, user_id) → record
    records: DashMap<AvailabilityKey, WeeklyAvailability>,
}

impl InMemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn key(organization_id: &str, user_id: &str) -> AvailabilityKey {
    (organization_id.to_string(), user_id.to_string())
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn find(
        &self,
        user_id: &str,
        organization_id: &str,
    ) -> anyhow::Result<Option<WeeklyAvailability>> {
        Ok(self
            .records
            .get(&key(organization_id, user_id))
            .map(|r| r.value().clone()))
    }

    async fn find_by_organization(
        &self,
        organization_id: &str,
    ) -> anyhow::Result<Vec<WeeklyAvailability>> {
        let mut out: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.key().0 == organization_id)
            .map(|r| r.value().clone())
            .collect();
        out.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(out)
    }

    async fn upsert(&self, record: WeeklyAvailability) -> anyhow::Result<()> {
        self.records
            .insert(key(&record.organization_id, &record.user_id), record);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryEventsRepository {
    events: DashMap<Uuid, CalendarEvent>,
}

impl InMemoryEventsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventsRepository for InMemoryEventsRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<CalendarEvent>> {
        Ok(self.events.get(&id).map(|e| e.value().clone()))
    }

    async fn find_in_window(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        let window = EventWindow { start, end };
        let mut out: Vec<_> = self
            .events
            .iter()
            .filter(|e| e.organization_id == organization_id && window.contains(e.value()))
            .map(|e| e.value().clone())
            .collect();
        out.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn insert(&self, event: CalendarEvent) -> anyhow::Result<()> {
        match self.events.entry(event.id) {
            Entry::Occupied(_) => anyhow::bail!("event {} already exists", event.id),
            Entry::Vacant(slot) => {
                slot.insert(event);
                Ok(())
            }
        }
    }

    async fn update(&self, event: CalendarEvent) -> anyhow::Result<()> {
        match self.events.get_mut(&event.id) {
            Some(mut slot) => {
                *slot = event;
                Ok(())
            }
            None => anyhow::bail!("event {} does not exist", event.id),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.events.remove(&id).is_some())
    }
}
