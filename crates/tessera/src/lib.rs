//! # Tessera
//!
//! Version-aware placeholder resolution for game server hosts.
//!
//! ## Overview
//!
//! A host hands Tessera a token such as `colored_ping` or
//! `item_in_hand_level_sharpness` together with a player, and gets back a
//! string. Underneath, the server version is detected once and decides, per
//! operation, whether data is read through a native API, through a cached
//! reflective binding on older servers, or not at all.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────┐     ┌───────────┐     ┌──────────────┐
//! │   Runtime    │────▶│ Dispatcher │────▶│ Accessors │────▶│ Host/Subject │
//! │ (config/log) │     │ (prefixes, │     │ (native / │     │  (adapter)   │
//! └──────────────┘     │  statics)  │     │  legacy)  │     └──────────────┘
//!                      └─────┬──────┘     └───────────┘
//!                            ▼
//!                      ┌────────────┐
//!                      │  RuleSet   │  numeric colouring
//!                      └────────────┘
//! ```
//!
//! - **Core**: host contracts, version detection, capabilities, accessors
//! - **Framework**: dispatcher, formatting rules, player placeholder table
//! - **Runtime**: configuration, logging and [`ExpansionRuntime`](runtime::ExpansionRuntime)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera::prelude::*;
//!
//! let runtime = ExpansionRuntime::builder()
//!     .host(Arc::new(MyServer::new()))
//!     .build()?;
//!
//! let player = SubjectSnapshot::new("Steve").with(Property::Ping, 42);
//! assert_eq!(runtime.resolve("ping", Some(&player)).as_deref(), Some("42"));
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use tessera_core as core;
pub use tessera_framework as framework;
pub use tessera_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use tessera_runtime::{ExpansionRuntime, RuntimeError, RuntimeResult, TesseraConfig};

    // Host contracts - implemented by adapters
    pub use tessera_core::{
        Enchantment, FieldHandle, FieldValue, HiddenHandle, Host, Inventory, ItemView, Location,
        Property, Slot, Subject, SubjectSnapshot, Value,
    };

    // Version and capability queries
    pub use tessera_core::{Capabilities, Capability, EnvironmentVersion};

    // Extending the placeholder table
    pub use tessera_framework::{Dispatcher, Liveness, ResolveContext, RuleSet};
}
