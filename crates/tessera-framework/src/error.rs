//! Error types for the Tessera framework.
//!
//! None of these escape a resolution call. Rule errors are logged and the
//! offending entry is skipped; settings errors surface when the runtime
//! builds its [`Settings`](crate::context::Settings).

use thiserror::Error;

/// A formatting rule condition that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The condition contains no usable integer.
    #[error("invalid condition '{condition}': no threshold found")]
    MissingThreshold {
        /// The condition as configured.
        condition: String,
    },

    /// A range condition whose lower bound exceeds its upper bound.
    #[error("invalid condition '{condition}': {low} is greater than {high}")]
    ReversedRange {
        condition: String,
        low: i64,
        high: i64,
    },
}

impl RuleError {
    /// Creates a missing threshold error.
    pub fn missing_threshold(condition: impl Into<String>) -> Self {
        Self::MissingThreshold {
            condition: condition.into(),
        }
    }
}

/// Result type for rule parsing.
pub type RuleResult<T> = Result<T, RuleError>;

/// Invalid resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid date format '{format}': {reason}")]
    DateFormat { format: String, reason: String },
}

/// Result type for settings construction.
pub type SettingsResult<T> = Result<T, SettingsError>;
