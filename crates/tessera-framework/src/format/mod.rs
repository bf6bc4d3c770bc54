//! Formatting rule engine.
//!
//! A [`RuleSet`] turns a number into a styled string: the template of the
//! first matching [`FormattingRule`] is colour-translated and the value is
//! appended.

pub mod color;
pub mod rule;
pub mod rule_set;

pub use color::{DEFAULT_MARKER, translate_codes};
pub use rule::{Comparator, FormattingRule};
pub use rule_set::{BucketColors, RuleSet, SharedRuleSet};
