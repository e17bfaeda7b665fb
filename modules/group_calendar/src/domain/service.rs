use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{
    AvailabilityUpdate, CalendarEvent, CallerCtx, DayRanges, EventPatch, EventWindow, NewEvent,
    OverlapResult, TimeRange, Weekday, WeeklyAvailability,
};
use crate::domain::error::DomainError;
use crate::domain::events::CalendarDomainEvent;
use crate::domain::overlap::{compute_overlap, OverlapMode};
use crate::domain::ports::EventPublisher;
use crate::domain::repo::{AvailabilityRepository, EventsRepository};

/// Domain service for availability and calendar events.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    availability: Arc<dyn AvailabilityRepository>,
    events: Arc<dyn EventsRepository>,
    publisher: Arc<dyn EventPublisher<CalendarDomainEvent>>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub overlap_mode: OverlapMode,
    pub reject_inverted_ranges: bool,
    pub max_ranges_per_day: usize,
    pub max_title_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            overlap_mode: OverlapMode::default(),
            reject_inverted_ranges: true,
            max_ranges_per_day: 48,
            max_title_length: 200,
        }
    }
}

fn db_err(e: anyhow::Error) -> DomainError {
    DomainError::database(format!("{e:#}"))
}

impl Service {
    pub fn new(
        availability: Arc<dyn AvailabilityRepository>,
        events: Arc<dyn EventsRepository>,
        publisher: Arc<dyn EventPublisher<CalendarDomainEvent>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            availability,
            events,
            publisher,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // --- availability ---

    #[instrument(
        name = "group_calendar.service.get_availability",
        skip(self),
        fields(user_id = %ctx.user_id, org = %ctx.organization_id)
    )]
    pub async fn get_availability(
        &self,
        ctx: &CallerCtx,
    ) -> Result<Option<WeeklyAvailability>, DomainError> {
        validate_ctx(ctx)?;
        self.availability
            .find(&ctx.user_id, &ctx.organization_id)
            .await
            .map_err(db_err)
    }

    /// Create the caller's record with full-day availability if it is missing.
    #[instrument(
        name = "group_calendar.service.initialize_availability",
        skip(self),
        fields(user_id = %ctx.user_id, org = %ctx.organization_id)
    )]
    pub async fn initialize_availability(
        &self,
        ctx: &CallerCtx,
    ) -> Result<WeeklyAvailability, DomainError> {
        validate_ctx(ctx)?;
        if let Some(existing) = self
            .availability
            .find(&ctx.user_id, &ctx.organization_id)
            .await
            .map_err(db_err)?
        {
            debug!("Availability already initialized");
            return Ok(existing);
        }

        let full_week: DayRanges = Weekday::ALL
            .iter()
            .map(|&day| (day, vec![TimeRange::FULL_DAY]))
            .collect();
        let record = self.save_ranges(ctx, full_week, None).await?;
        info!("Initialized full-day availability");
        Ok(record)
    }

    /// Validate every submitted range, then replace the caller's week.
    /// A single bad range rejects the whole update.
    #[instrument(
        name = "group_calendar.service.update_availability",
        skip(self, update),
        fields(user_id = %ctx.user_id, org = %ctx.organization_id)
    )]
    pub async fn update_availability(
        &self,
        ctx: &CallerCtx,
        update: AvailabilityUpdate,
    ) -> Result<WeeklyAvailability, DomainError> {
        validate_ctx(ctx)?;
        let ranges = self.validate_update(&update)?;

        let existing = self
            .availability
            .find(&ctx.user_id, &ctx.organization_id)
            .await
            .map_err(db_err)?;
        let record = self.save_ranges(ctx, ranges, existing).await?;
        info!(days = record.time_ranges.len(), "Availability updated");
        Ok(record)
    }

    #[instrument(
        name = "group_calendar.service.list_group_availability",
        skip(self),
        fields(org = %ctx.organization_id)
    )]
    pub async fn list_group_availability(
        &self,
        ctx: &CallerCtx,
    ) -> Result<Vec<WeeklyAvailability>, DomainError> {
        validate_ctx(ctx)?;
        let records = self
            .availability
            .find_by_organization(&ctx.organization_id)
            .await
            .map_err(db_err)?;
        debug!("Loaded {} availability records", records.len());
        Ok(records)
    }

    #[instrument(
        name = "group_calendar.service.calculate_overlap",
        skip(self),
        fields(org = %ctx.organization_id)
    )]
    pub async fn calculate_overlap(&self, ctx: &CallerCtx) -> Result<OverlapResult, DomainError> {
        let records = self.list_group_availability(ctx).await?;
        let result = compute_overlap(&records, self.config.overlap_mode);
        debug!(
            user_count = result.user_count,
            mode = ?self.config.overlap_mode,
            "Overlap computed"
        );
        Ok(result)
    }

    async fn save_ranges(
        &self,
        ctx: &CallerCtx,
        time_ranges: DayRanges,
        existing: Option<WeeklyAvailability>,
    ) -> Result<WeeklyAvailability, DomainError> {
        let now = Utc::now();
        let record = WeeklyAvailability {
            user_id: ctx.user_id.clone(),
            organization_id: ctx.organization_id.clone(),
            user_email: ctx.user_email.clone(),
            time_ranges,
            created_at: existing.map_or(now, |r| r.created_at),
            updated_at: now,
        };

        self.availability
            .upsert(record.clone())
            .await
            .map_err(db_err)?;

        self.publisher
            .publish(&CalendarDomainEvent::AvailabilityUpdated {
                user_id: record.user_id.clone(),
                organization_id: record.organization_id.clone(),
                at: now,
            });
        Ok(record)
    }

    fn validate_update(&self, update: &AvailabilityUpdate) -> Result<DayRanges, DomainError> {
        let mut out = DayRanges::new();
        for (&day, inputs) in &update.time_ranges {
            if inputs.len() > self.config.max_ranges_per_day {
                return Err(DomainError::too_many_ranges(
                    day,
                    inputs.len(),
                    self.config.max_ranges_per_day,
                ));
            }
            let mut parsed = Vec::with_capacity(inputs.len());
            for input in inputs {
                let range = TimeRange::parse(&input.start, &input.end)
                    .map_err(|e| DomainError::invalid_time(day, e))?;
                if self.config.reject_inverted_ranges && range.is_inverted() {
                    return Err(DomainError::inverted_range(day, range.start, range.end));
                }
                parsed.push(range);
            }
            out.insert(day, parsed);
        }
        Ok(out)
    }

    // --- events ---

    #[instrument(
        name = "group_calendar.service.create_event",
        skip(self, new_event),
        fields(org = %ctx.organization_id, title = %new_event.title)
    )]
    pub async fn create_event(
        &self,
        ctx: &CallerCtx,
        new_event: NewEvent,
    ) -> Result<CalendarEvent, DomainError> {
        validate_ctx(ctx)?;
        let title = self.validate_title(&new_event.title)?;
        if new_event.end < new_event.start {
            return Err(DomainError::EventEndsBeforeStart);
        }

        let now = Utc::now();
        let event = CalendarEvent {
            id: Uuid::new_v4(),
            organization_id: ctx.organization_id.clone(),
            created_by: ctx.user_id.clone(),
            title,
            start: new_event.start,
            end: new_event.end,
            all_day: new_event.all_day,
            created_at: now,
            updated_at: now,
        };

        self.events.insert(event.clone()).await.map_err(db_err)?;
        self.publisher.publish(&CalendarDomainEvent::EventCreated {
            id: event.id,
            at: event.created_at,
        });

        info!("Created event id={}", event.id);
        Ok(event)
    }

    #[instrument(
        name = "group_calendar.service.get_event",
        skip(self),
        fields(org = %ctx.organization_id, event_id = %id)
    )]
    pub async fn get_event(&self, ctx: &CallerCtx, id: Uuid) -> Result<CalendarEvent, DomainError> {
        validate_ctx(ctx)?;
        self.events
            .find_by_id(id)
            .await
            .map_err(db_err)?
            // events of other organizations are invisible
            .filter(|e| e.organization_id == ctx.organization_id)
            .ok_or_else(|| DomainError::event_not_found(id))
    }

    #[instrument(
        name = "group_calendar.service.list_events",
        skip(self),
        fields(org = %ctx.organization_id)
    )]
    pub async fn list_events(
        &self,
        ctx: &CallerCtx,
        window: EventWindow,
    ) -> Result<Vec<CalendarEvent>, DomainError> {
        validate_ctx(ctx)?;
        if window.end < window.start {
            return Err(DomainError::validation("window", "end is before start"));
        }
        let events = self
            .events
            .find_in_window(&ctx.organization_id, window.start, window.end)
            .await
            .map_err(db_err)?;
        debug!("Listed {} events", events.len());
        Ok(events)
    }

    #[instrument(
        name = "group_calendar.service.update_event",
        skip(self, patch),
        fields(org = %ctx.organization_id, event_id = %id)
    )]
    pub async fn update_event(
        &self,
        ctx: &CallerCtx,
        id: Uuid,
        patch: EventPatch,
    ) -> Result<CalendarEvent, DomainError> {
        let mut current = self.get_event(ctx, id).await?;

        if let Some(title) = patch.title {
            current.title = self.validate_title(&title)?;
        }
        if let Some(start) = patch.start {
            current.start = start;
        }
        if let Some(end) = patch.end {
            current.end = end;
        }
        if let Some(all_day) = patch.all_day {
            current.all_day = all_day;
        }
        if current.end < current.start {
            return Err(DomainError::EventEndsBeforeStart);
        }
        current.updated_at = Utc::now();

        self.events.update(current.clone()).await.map_err(db_err)?;
        self.publisher.publish(&CalendarDomainEvent::EventUpdated {
            id: current.id,
            at: current.updated_at,
        });

        info!("Updated event");
        Ok(current)
    }

    #[instrument(
        name = "group_calendar.service.delete_event",
        skip(self),
        fields(org = %ctx.organization_id, event_id = %id)
    )]
    pub async fn delete_event(&self, ctx: &CallerCtx, id: Uuid) -> Result<(), DomainError> {
        // ownership check: only events of the caller's organization
        self.get_event(ctx, id).await?;

        let deleted = self.events.delete(id).await.map_err(db_err)?;
        if !deleted {
            return Err(DomainError::event_not_found(id));
        }

        self.publisher
            .publish(&CalendarDomainEvent::EventDeleted { id, at: Utc::now() });
        info!("Deleted event");
        Ok(())
    }

    fn validate_title(&self, title: &str) -> Result<String, DomainError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        let len = trimmed.chars().count();
        if len > self.config.max_title_length {
            return Err(DomainError::title_too_long(len, self.config.max_title_length));
        }
        Ok(trimmed.to_string())
    }
}

fn validate_ctx(ctx: &CallerCtx) -> Result<(), DomainError> {
    if ctx.organization_id.trim().is_empty() {
        return Err(DomainError::MissingOrganization);
    }
    if ctx.user_id.trim().is_empty() {
        return Err(DomainError::MissingUser);
    }
    Ok(())
}
