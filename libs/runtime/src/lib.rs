//! Process-level plumbing shared by groupcal binaries: layered configuration,
//! home directory resolution and logging initialisation.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{default_logging_config, AppConfig, CliArgs, CoreConfig, LoggingConfig, Section};
