use std::sync::Arc;

use tracing::{debug, info};

use crate::config::GroupCalendarConfig;
use crate::contract::client::GroupCalendarApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::GroupCalendarLocalClient;
use crate::infra::events::LogEventPublisher;
use crate::infra::storage::{InMemoryAvailabilityRepository, InMemoryEventsRepository};

/// Module entry point: wires storage, event publishing and the domain service.
#[derive(Clone)]
pub struct GroupCalendar {
    service: Arc<Service>,
    api: Arc<dyn GroupCalendarApi>,
}

impl GroupCalendar {
    pub const NAME: &'static str = "group_calendar";

    /// Build the module over the in-memory document store.
    pub fn init(cfg: &GroupCalendarConfig) -> Self {
        info!("Initializing group_calendar module");
        debug!(
            "Loaded group_calendar config: overlap_mode={:?}, reject_inverted_ranges={}, max_ranges_per_day={}",
            cfg.overlap_mode, cfg.reject_inverted_ranges, cfg.max_ranges_per_day
        );

        let service = Arc::new(Service::new(
            Arc::new(InMemoryAvailabilityRepository::new()),
            Arc::new(InMemoryEventsRepository::new()),
            Arc::new(LogEventPublisher),
            ServiceConfig::from(cfg),
        ));

        let api: Arc<dyn GroupCalendarApi> =
            Arc::new(GroupCalendarLocalClient::new(Arc::clone(&service)));
        info!("group_calendar API ready");
        Self { service, api }
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn GroupCalendarApi> {
        Arc::clone(&self.api)
    }

    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }
}

impl Default for GroupCalendar {
    fn default() -> Self {
        Self::init(&GroupCalendarConfig::default())
    }
}
