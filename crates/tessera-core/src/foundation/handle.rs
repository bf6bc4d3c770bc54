//! Introspection over a subject's internal implementation handle.
//!
//! Older hosts expose some data only on a hidden, implementation-specific
//! object. A [`HiddenHandle`] describes that object in two steps: an
//! expensive, type-level [`shape`](HiddenHandle::shape) lookup that maps
//! field names to [`FieldSlot`]s, and a cheap per-instance
//! [`read`](HiddenHandle::read) of a slot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, AccessResult};

/// Position of a field inside a [`HandleShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSlot(pub usize);

/// Layout of a handle type: its name and ordered field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleShape {
    type_name: String,
    fields: Vec<String>,
}

impl HandleShape {
    pub fn new(type_name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Finds the slot of a declared field.
    pub fn slot_of(&self, field: &str) -> Option<FieldSlot> {
        self.fields.iter().position(|f| f == field).map(FieldSlot)
    }

    /// Like [`slot_of`](Self::slot_of), reporting a missing field as an error.
    pub fn require(&self, field: &'static str) -> AccessResult<FieldSlot> {
        self.slot_of(field)
            .ok_or_else(|| AccessError::missing_field(&self.type_name, field))
    }
}

/// A raw field value read from a handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Reflective view of a subject's backing implementation.
pub trait HiddenHandle: Send + Sync {
    /// Concrete type of this instance. Cheap; checked on every legacy read.
    fn type_name(&self) -> &str;

    /// Describes the handle's type. Expensive; callers cache the result.
    fn shape(&self) -> AccessResult<HandleShape>;

    /// Reads one field of this particular instance.
    fn read(&self, slot: FieldSlot) -> AccessResult<FieldValue>;
}
