//! Tessera core: host contracts, capability detection and accessor strategies.
//!
//! # Architecture
//!
//! - **Foundation**: the [`Host`] and [`Subject`] traits adapters implement,
//!   plus the value types that cross them
//! - **Capability**: [`detect`] the environment version once and derive
//!   immutable [`Capabilities`] from it
//! - **Accessor**: [`Accessors`] serve version-sensitive reads, binding
//!   legacy paths lazily and falling back to sentinels
//!
//! Nothing here holds global state. The runtime builds one `Capabilities`
//! and one `Accessors` at startup and passes them explicitly.

pub mod accessor;
pub mod capability;
pub mod error;
pub mod foundation;

pub use accessor::{Accessors, Operation, Strategy};
pub use capability::{Capabilities, Capability, EnvironmentVersion, capabilities, detect};
pub use error::{AccessError, AccessResult, VersionError, VersionResult};
pub use foundation::{
    Enchantment, FieldHandle, FieldValue, HiddenHandle, Host, Inventory, ItemView, Location,
    Property, Slot, Subject, SubjectSnapshot, Value,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::accessor::{Accessors, Operation, Strategy};
    pub use crate::capability::{Capabilities, Capability, EnvironmentVersion};
    pub use crate::error::{AccessError, VersionError};
    pub use crate::foundation::{
        Host, ItemView, Location, Property, Slot, Subject, SubjectSnapshot, Value,
    };
}
