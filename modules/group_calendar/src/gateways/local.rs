use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::GroupCalendarApi,
    error::GroupCalendarError,
    model::{
        AvailabilityUpdate, CalendarEvent, CallerCtx, EventPatch, EventWindow, NewEvent,
        OverlapResult, WeeklyAvailability,
    },
};
use crate::domain::service::Service;

/// Local implementation of the GroupCalendarApi trait that delegates to the domain service
pub struct GroupCalendarLocalClient {
    service: Arc<Service>,
}

impl GroupCalendarLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl GroupCalendarApi for GroupCalendarLocalClient {
    async fn get_availability(
        &self,
        ctx: &CallerCtx,
    ) -> Result<Option<WeeklyAvailability>, GroupCalendarError> {
        self.service.get_availability(ctx).await.map_err(Into::into)
    }

    async fn initialize_availability(
        &self,
        ctx: &CallerCtx,
    ) -> Result<WeeklyAvailability, GroupCalendarError> {
        self.service
            .initialize_availability(ctx)
            .await
            .map_err(Into::into)
    }

    async fn update_availability(
        &self,
        ctx: &CallerCtx,
        update: AvailabilityUpdate,
    ) -> Result<WeeklyAvailability, GroupCalendarError> {
        self.service
            .update_availability(ctx, update)
            .await
            .map_err(Into::into)
    }

    async fn list_group_availability(
        &self,
        ctx: &CallerCtx,
    ) -> Result<Vec<WeeklyAvailability>, GroupCalendarError> {
        self.service
            .list_group_availability(ctx)
            .await
            .map_err(Into::into)
    }

    async fn calculate_overlap(
        &self,
        ctx: &CallerCtx,
    ) -> Result<OverlapResult, GroupCalendarError> {
        self.service.calculate_overlap(ctx).await.map_err(Into::into)
    }

    async fn create_event(
        &self,
        ctx: &CallerCtx,
        new_event: NewEvent,
    ) -> Result<CalendarEvent, GroupCalendarError> {
        self.service
            .create_event(ctx, new_event)
            .await
            .map_err(Into::into)
    }

    async fn get_event(
        &self,
        ctx: &CallerCtx,
        id: Uuid,
    ) -> Result<CalendarEvent, GroupCalendarError> {
        self.service.get_event(ctx, id).await.map_err(Into::into)
    }

    async fn list_events(
        &self,
        ctx: &CallerCtx,
        window: EventWindow,
    ) -> Result<Vec<CalendarEvent>, GroupCalendarError> {
        self.service
            .list_events(ctx, window)
            .await
            .map_err(Into::into)
    }

    async fn update_event(
        &self,
        ctx: &CallerCtx,
        id: Uuid,
        patch: EventPatch,
    ) -> Result<CalendarEvent, GroupCalendarError> {
        self.service
            .update_event(ctx, id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_event(&self, ctx: &CallerCtx, id: Uuid) -> Result<(), GroupCalendarError> {
        self.service.delete_event(ctx, id).await.map_err(Into::into)
    }
}
