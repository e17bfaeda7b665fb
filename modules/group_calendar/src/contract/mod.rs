pub mod client;
pub mod error;
pub mod model;

pub use client::GroupCalendarApi;
pub use error::GroupCalendarError;
pub use model::*;
