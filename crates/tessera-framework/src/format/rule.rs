//! A single condition → template formatting rule.

use std::fmt;

use crate::error::{RuleError, RuleResult};

/// How a rule compares a value against its threshold(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    GreaterThan(i64),
    LessThan(i64),
    EqualTo(i64),
    /// Both bounds inclusive.
    RangeInclusive(i64, i64),
}

impl Comparator {
    /// Parses a rule condition such as `">100"`, `"=0"`, `"42"` or `"50-100"`.
    ///
    /// The leading character picks the comparator; non-digit characters are
    /// stripped from the remainder before parsing. A condition without a
    /// comparator that contains `-` is a range; an empty side leaves the
    /// range open on that side (`"50-"`, `"-100"`).
    pub fn parse(condition: &str) -> RuleResult<Self> {
        let condition = condition.trim();
        let missing = || RuleError::missing_threshold(condition);

        if let Some(rest) = condition.strip_prefix('>') {
            return threshold(rest).map(Self::GreaterThan).ok_or_else(missing);
        }
        if let Some(rest) = condition.strip_prefix('<') {
            return threshold(rest).map(Self::LessThan).ok_or_else(missing);
        }
        if let Some(rest) = condition.strip_prefix('=') {
            return threshold(rest).map(Self::EqualTo).ok_or_else(missing);
        }

        if let Some((low, high)) = condition.split_once('-') {
            let bound = |side: &str, open: i64| {
                if side.trim().is_empty() {
                    Ok(open)
                } else {
                    threshold(side).ok_or_else(missing)
                }
            };
            let (low, high) = (bound(low, i64::MIN)?, bound(high, i64::MAX)?);
            if low == i64::MIN && high == i64::MAX {
                return Err(missing());
            }
            if low > high {
                return Err(RuleError::ReversedRange {
                    condition: condition.to_string(),
                    low,
                    high,
                });
            }
            return Ok(Self::RangeInclusive(low, high));
        }

        threshold(condition).map(Self::EqualTo).ok_or_else(missing)
    }

    pub fn matches(&self, value: i64) -> bool {
        match *self {
            Self::GreaterThan(t) => value > t,
            Self::LessThan(t) => value < t,
            Self::EqualTo(t) => value == t,
            Self::RangeInclusive(low, high) => (low..=high).contains(&value),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::GreaterThan(t) => write!(f, ">{t}"),
            Self::LessThan(t) => write!(f, "<{t}"),
            Self::EqualTo(t) => write!(f, "={t}"),
            Self::RangeInclusive(i64::MIN, high) => write!(f, "-{high}"),
            Self::RangeInclusive(low, i64::MAX) => write!(f, "{low}-"),
            Self::RangeInclusive(low, high) => write!(f, "{low}-{high}"),
        }
    }
}

fn threshold(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// A comparator paired with the template applied when it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingRule {
    comparator: Comparator,
    template: String,
}

impl FormattingRule {
    pub fn new(comparator: Comparator, template: impl Into<String>) -> Self {
        Self {
            comparator,
            template: template.into(),
        }
    }

    /// Parses `condition` and pairs it with `template`.
    pub fn parse(condition: &str, template: impl Into<String>) -> RuleResult<Self> {
        Ok(Self::new(Comparator::parse(condition)?, template))
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Raw template, before colour translation.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn matches(&self, value: i64) -> bool {
        self.comparator.matches(value)
    }
}
