//! Configuration file persistence.

pub mod config;

pub use config::{load_config, ConfigError, FileConfig, ServerSection};
