//! Unified error types for the Tessera core.
//!
//! Only [`VersionError`] is fatal. Every [`AccessError`] is absorbed by the
//! accessor layer and turned into the operation's sentinel value.

use thiserror::Error;

// =============================================================================
// Version Errors
// =============================================================================

/// Errors raised while detecting the running environment version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// No `major.minor[.patch]` sequence was found in the host string.
    #[error("could not find a version in '{raw}'")]
    NotFound {
        /// The raw host version string.
        raw: String,
    },

    /// A version component does not fit the two-digit encoding.
    #[error("version component {component} = {value} is out of range in '{raw}'")]
    OutOfRange {
        /// The raw host version string.
        raw: String,
        /// Component name (`minor` or `patch`).
        component: &'static str,
        /// The offending value.
        value: u64,
    },
}

// =============================================================================
// Access Errors
// =============================================================================

/// Errors that can occur while reaching into a subject through a legacy path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The subject exposes no hidden handle at all.
    #[error("subject '{subject}' exposes no internal handle")]
    NoHandle {
        /// Name of the subject.
        subject: String,
    },

    /// The handle type has no field with the requested name.
    #[error("type '{type_name}' has no field '{field}'")]
    MissingField {
        /// Concrete handle type name.
        type_name: String,
        /// Requested field.
        field: &'static str,
    },

    /// The field exists but holds a value of another kind.
    #[error("field '{field}' holds {found}, expected {expected}")]
    TypeMismatch {
        /// Requested field.
        field: &'static str,
        /// Expected value kind.
        expected: &'static str,
        /// Actual value kind.
        found: &'static str,
    },

    /// The instance's handle is not of the type the accessor was bound to.
    #[error("accessor bound to '{bound}' cannot read a '{found}' handle")]
    ForeignHandle {
        /// Handle type seen at bind time.
        bound: String,
        /// Handle type of this instance.
        found: String,
    },

    /// Reading a bound field failed for one specific instance.
    #[error("could not read field slot {slot}: {reason}")]
    ReadFailed {
        /// Slot index inside the handle shape.
        slot: usize,
        /// Reason for failure.
        reason: String,
    },
}

impl AccessError {
    /// Creates a no-handle error.
    pub fn no_handle(subject: impl Into<String>) -> Self {
        Self::NoHandle {
            subject: subject.into(),
        }
    }

    /// Creates a missing-field error.
    pub fn missing_field(type_name: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            type_name: type_name.into(),
            field,
        }
    }

    /// Creates a per-instance read failure.
    pub fn read_failed(slot: usize, reason: impl Into<String>) -> Self {
        Self::ReadFailed {
            slot,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for version detection.
pub type VersionResult<T> = Result<T, VersionError>;

/// Result type for legacy access.
pub type AccessResult<T> = Result<T, AccessError>;
