//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tessera_framework::context::DEFAULT_DATE_FORMAT;
use tessera_framework::format::DEFAULT_MARKER;
use tessera_framework::{BucketColors, RuleSet};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TesseraConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rendering settings shared by all placeholders.
    #[serde(default)]
    pub placeholders: PlaceholderConfig,

    /// Ping colouring.
    #[serde(default)]
    pub ping: PingConfig,
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    #[cfg(feature = "json-log")]
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanEventConfig {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    pub close: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Log file, used when `output = "file"`; defaults to `./tessera.log`.
    pub file_path: Option<PathBuf>,
    pub thread_ids: bool,
    /// Include file and line of the call site.
    pub file_location: bool,
    /// Per-module levels, e.g. `tessera_core = "debug"`.
    pub filters: HashMap<String, LogLevel>,
    pub span_events: SpanEventConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            file_path: None,
            thread_ids: false,
            file_location: false,
            filters: HashMap::new(),
            span_events: SpanEventConfig::default(),
        }
    }
}

// =============================================================================
// Placeholders
// =============================================================================

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    pub boolean_true: String,
    pub boolean_false: String,
    /// `time` format description used for `*_formatted` and `*_date` keys.
    pub date_format: String,
    /// Rich-text marker that `&` colour codes translate into.
    pub color_marker: char,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            boolean_true: "yes".into(),
            boolean_false: "no".into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            color_marker: DEFAULT_MARKER,
        }
    }
}

// =============================================================================
// Ping
// =============================================================================

/// One `[[ping.formatting]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingEntry {
    /// Condition such as `">100"`, `"=0"` or `"50-100"`.
    pub when: String,
    /// Template prepended to the value, with `&` colour codes.
    pub format: String,
}

impl FormattingEntry {
    pub fn new(when: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            when: when.into(),
            format: format.into(),
        }
    }
}

/// Ping colouring: explicit ordered rules, or the three colour buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingConfig {
    pub colors: BucketColors,
    pub formatting: Vec<FormattingEntry>,
}

impl PingConfig {
    /// Formatting entries as an ordered condition → template mapping.
    ///
    /// A repeated condition keeps its first position and its last template.
    pub fn ordered_rules(&self) -> IndexMap<String, String> {
        self.formatting
            .iter()
            .map(|e| (e.when.clone(), e.format.clone()))
            .collect()
    }

    /// Builds the active rule set. The buckets apply when no rules are set.
    pub fn rule_set(&self, marker: char) -> RuleSet {
        if self.formatting.is_empty() {
            RuleSet::from_buckets(&self.colors, marker)
        } else {
            RuleSet::load(self.ordered_rules(), marker)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_rules_keep_declaration_order() {
        let ping = PingConfig {
            formatting: vec![
                FormattingEntry::new(">200", "&4"),
                FormattingEntry::new(">100", "&e"),
                FormattingEntry::new("=0", "&9"),
                FormattingEntry::new(">200", "&5"),
            ],
            ..Default::default()
        };
        let rules = ping.ordered_rules();
        let keys: Vec<_> = rules.keys().map(String::as_str).collect();
        assert_eq!(keys, [">200", ">100", "=0"]);
        assert_eq!(rules[">200"], "&5");
    }

    #[test]
    fn test_rule_set_falls_back_to_buckets() {
        let ping = PingConfig::default();
        let rules = ping.rule_set('§');
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.format(120), "§c120");
    }
}
