//! Ordered rule sets and their shared, reloadable holder.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::color::{DEFAULT_MARKER, translate_codes};
use super::rule::{Comparator, FormattingRule};

/// Three-bucket colouring used when no explicit rules are configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketColors {
    /// Template for values strictly above `high_threshold`.
    pub low: String,
    /// Template for values between the thresholds, inclusive.
    pub medium: String,
    /// Template for values strictly below `medium_threshold`.
    pub high: String,
    pub medium_threshold: i64,
    pub high_threshold: i64,
}

impl Default for BucketColors {
    fn default() -> Self {
        Self {
            low: "&c".into(),
            medium: "&e".into(),
            high: "&a".into(),
            medium_threshold: 50,
            high_threshold: 100,
        }
    }
}

/// An ordered, immutable sequence of formatting rules.
///
/// Evaluation is first-match-wins in load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<FormattingRule>,
    marker: char,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::empty(DEFAULT_MARKER)
    }
}

impl RuleSet {
    pub fn empty(marker: char) -> Self {
        Self {
            rules: Vec::new(),
            marker,
        }
    }

    /// Loads rules from ordered `(condition, template)` entries.
    ///
    /// Entries whose condition cannot be parsed are skipped with a warning.
    pub fn load<I, K, V>(entries: I, marker: char) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut rules = Vec::new();
        for (condition, template) in entries {
            let condition = condition.as_ref();
            match FormattingRule::parse(condition, template) {
                Ok(rule) => rules.push(rule),
                Err(e) => warn!(condition, error = %e, "Skipping formatting rule"),
            }
        }
        debug!(count = rules.len(), "Loaded formatting rules");
        Self { rules, marker }
    }

    /// Builds the three-bucket rule set.
    pub fn from_buckets(colors: &BucketColors, marker: char) -> Self {
        let rules = vec![
            FormattingRule::new(
                Comparator::GreaterThan(colors.high_threshold),
                colors.low.clone(),
            ),
            FormattingRule::new(
                Comparator::RangeInclusive(colors.medium_threshold, colors.high_threshold),
                colors.medium.clone(),
            ),
            FormattingRule::new(
                Comparator::LessThan(colors.medium_threshold),
                colors.high.clone(),
            ),
        ];
        Self { rules, marker }
    }

    pub fn rules(&self) -> &[FormattingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// Applies the first matching rule, or `None` if no rule matches.
    pub fn evaluate(&self, value: i64) -> Option<String> {
        self.rules
            .iter()
            .find(|rule| rule.matches(value))
            .map(|rule| translate_codes(rule.template(), self.marker) + &value.to_string())
    }

    /// Formats `value`, falling back to the bare value.
    ///
    /// Negative values are sentinels and are never formatted.
    pub fn format(&self, value: i64) -> String {
        if value < 0 {
            return value.to_string();
        }
        self.evaluate(value).unwrap_or_else(|| value.to_string())
    }
}

/// A rule set that can be swapped atomically while readers hold snapshots.
#[derive(Debug, Default)]
pub struct SharedRuleSet {
    current: RwLock<Arc<RuleSet>>,
}

impl SharedRuleSet {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// Snapshot of the current rule set.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        Arc::clone(&self.current.read())
    }

    /// Replaces the whole rule set.
    pub fn replace(&self, rules: RuleSet) {
        *self.current.write() = Arc::new(rules);
    }
}
