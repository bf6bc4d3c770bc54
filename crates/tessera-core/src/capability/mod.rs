//! Capability registry: version detection and the flags derived from it.

pub mod flags;
pub mod version;

pub use flags::{Capabilities, Capability, capabilities};
pub use version::{EnvironmentVersion, detect};
