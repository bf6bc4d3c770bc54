//! Tessera Runtime - configuration, logging and the resolution entry point.
//!
//! This crate provides:
//! - Layered configuration loading (`tessera.toml`, `TESSERA_*` env vars)
//! - Logging setup from the `[logging]` section
//! - [`ExpansionRuntime`], which detects the host version once and resolves
//!   placeholder tokens for the rest of its life
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera_runtime::ExpansionRuntime;
//!
//! let runtime = ExpansionRuntime::builder()
//!     .host(Arc::new(MyServer::new()))
//!     .build()?;
//!
//! assert_eq!(runtime.resolve("name", Some(&player)).as_deref(), Some("Steve"));
//! ```
//!
//! Configuration can be reloaded at any time with
//! [`ExpansionRuntime::reload`]; the detected version and accessor bindings
//! survive a reload.

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::{ConfigError, ConfigLoader, ConfigResult, TesseraConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use runtime::{ExpansionRuntime, RuntimeBuilder};

// Re-export tracing for use by adapters
pub use tracing;
pub use tracing_subscriber;

/// Logging macros for adapter code.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
