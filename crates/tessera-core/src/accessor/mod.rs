//! Accessor strategy layer.
//!
//! Operations whose host API changed across versions are served by
//! [`Accessors`], which chooses a native or legacy strategy per operation
//! from the detected capabilities and degrades to a sentinel value.

pub mod binding;
pub mod legacy;
pub mod strategy;

pub use binding::{Binding, BindingCell, BindingState};
pub use legacy::{BoxedAccessor, FieldAccessor, FromField, LegacyAccessor};
pub use strategy::{
    ABSORPTION_SENTINEL, Accessors, DEFAULT_MAX_HEALTH, LOCALE_SENTINEL, Operation,
    PING_SENTINEL, Strategy,
};
