//! Configuration module for the Tessera runtime.
//!
//! This module provides figment-based configuration loading and validation
//! for logging, placeholder rendering and ping formatting.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile};
pub use schema::{
    FormattingEntry, LogFormat, LogLevel, LogOutput, LoggingConfig, PingConfig,
    PlaceholderConfig, SpanEventConfig, TesseraConfig,
};
pub use validation::validate_config;
