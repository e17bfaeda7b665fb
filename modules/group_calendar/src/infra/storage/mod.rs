pub mod memory;

pub use memory::{InMemoryAvailabilityRepository, InMemoryEventsRepository};
