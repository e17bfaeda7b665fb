use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::GroupCalendarError,
    model::{
        AvailabilityUpdate, CalendarEvent, CallerCtx, EventPatch, EventWindow, NewEvent,
        OverlapResult, WeeklyAvailability,
    },
};

/// Public API of the group_calendar module for in-process consumers
#[async_trait]
pub trait GroupCalendarApi: Send + Sync {
    /// The caller's own availability, if saved
    async fn get_availability(
        &self,
        ctx: &CallerCtx,
    ) -> Result<Option<WeeklyAvailability>, GroupCalendarError>;

    /// Create full-day availability for the caller unless it exists
    async fn initialize_availability(
        &self,
        ctx: &CallerCtx,
    ) -> Result<WeeklyAvailability, GroupCalendarError>;

    /// Replace the caller's weekly ranges (all-or-nothing validation)
    async fn update_availability(
        &self,
        ctx: &CallerCtx,
        update: AvailabilityUpdate,
    ) -> Result<WeeklyAvailability, GroupCalendarError>;

    /// Every member's availability in the caller's organization
    async fn list_group_availability(
        &self,
        ctx: &CallerCtx,
    ) -> Result<Vec<WeeklyAvailability>, GroupCalendarError>;

    /// Per-day overlap across the caller's organization
    async fn calculate_overlap(&self, ctx: &CallerCtx)
        -> Result<OverlapResult, GroupCalendarError>;

    async fn create_event(
        &self,
        ctx: &CallerCtx,
        new_event: NewEvent,
    ) -> Result<CalendarEvent, GroupCalendarError>;

    async fn get_event(&self, ctx: &CallerCtx, id: Uuid)
        -> Result<CalendarEvent, GroupCalendarError>;

    async fn list_events(
        &self,
        ctx: &CallerCtx,
        window: EventWindow,
    ) -> Result<Vec<CalendarEvent>, GroupCalendarError>;

    async fn update_event(
        &self,
        ctx: &CallerCtx,
        id: Uuid,
        patch: EventPatch,
    ) -> Result<CalendarEvent, GroupCalendarError>;

    async fn delete_event(&self, ctx: &CallerCtx, id: Uuid) -> Result<(), GroupCalendarError>;
}
