pub mod error;
pub mod events;
pub mod overlap;
pub mod ports;
pub mod repo;
pub mod service;
pub mod time;
