//! # Tessera Framework
//!
//! Higher-level resolution machinery built on `tessera-core`.
//!
//! This layer provides:
//! - A formatting rule engine ([`RuleSet`]) for styled numeric output
//! - A token [`Dispatcher`] with prefix and static handler tables
//! - Derived computations (compass direction, experience, world clock)
//! - The built-in player placeholder table ([`player`])
//!
//! Handlers receive a [`ResolveContext`] carrying the host, the accessors,
//! the active rule set and rendering [`Settings`].

pub mod calc;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod player;

pub use context::{ResolveContext, Settings};
pub use dispatcher::{ArgumentFilter, Dispatcher, Liveness, ParsedToken};
pub use error::{RuleError, RuleResult, SettingsError, SettingsResult};
pub use format::{BucketColors, Comparator, FormattingRule, RuleSet, SharedRuleSet};
