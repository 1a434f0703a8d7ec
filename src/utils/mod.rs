//! Engine configuration

pub mod config;

pub use config::{ConfigError, EngineConfig, SamplePolicy};
