// === PUBLIC CONTRACT ===
// Only the contract module should be used by other crates
pub mod contract;

pub use contract::{client, error, model};

// === MODULE DEFINITION ===
pub mod module;
pub use module::GroupCalendar;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed for the CLI and for comprehensive testing and should NOT be
// used by other modules. Only use the `contract` module for stable public APIs.
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
