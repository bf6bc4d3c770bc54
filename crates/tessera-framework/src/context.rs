//! Per-resolution context handed to every handler.

use std::fmt;
use std::sync::Arc;

use time::OffsetDateTime;
use time::format_description::{OwnedFormatItem, parse_owned};
use time::macros::format_description;
use tracing::warn;

use crate::error::{SettingsError, SettingsResult};
use crate::format::{DEFAULT_MARKER, RuleSet};
use tessera_core::{Accessors, Capabilities, Host};

/// Default date format, e.g. `03/14/24 09:26:53`.
pub const DEFAULT_DATE_FORMAT: &str =
    "[month]/[day]/[year repr:last_two] [hour]:[minute]:[second]";

/// Rendering settings shared by all placeholders.
#[derive(Debug, Clone)]
pub struct Settings {
    boolean_true: String,
    boolean_false: String,
    date_format: String,
    date_items: OwnedFormatItem,
    color_marker: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            boolean_true: "yes".into(),
            boolean_false: "no".into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            date_items: OwnedFormatItem::from(format_description!(
                version = 2,
                "[month]/[day]/[year repr:last_two] [hour]:[minute]:[second]"
            )),
            color_marker: DEFAULT_MARKER,
        }
    }
}

impl Settings {
    /// Builds settings, validating `date_format`.
    pub fn new(
        boolean_true: impl Into<String>,
        boolean_false: impl Into<String>,
        date_format: &str,
        color_marker: char,
    ) -> SettingsResult<Self> {
        let date_items = parse_date_format(date_format)?;
        Ok(Self {
            boolean_true: boolean_true.into(),
            boolean_false: boolean_false.into(),
            date_format: date_format.to_string(),
            date_items,
            color_marker,
        })
    }

    pub fn render_bool(&self, value: bool) -> String {
        if value {
            self.boolean_true.clone()
        } else {
            self.boolean_false.clone()
        }
    }

    /// Formats a Unix timestamp in milliseconds (UTC).
    pub fn format_timestamp(&self, millis: i64) -> String {
        let formatted = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .map_err(|e| e.to_string())
            .and_then(|dt| dt.format(&self.date_items).map_err(|e| e.to_string()));
        formatted.unwrap_or_else(|reason| {
            warn!(millis, reason = %reason, "Could not format timestamp");
            String::new()
        })
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn color_marker(&self) -> char {
        self.color_marker
    }
}

/// Parses a date format description.
pub fn parse_date_format(format: &str) -> SettingsResult<OwnedFormatItem> {
    parse_owned::<2>(format).map_err(|e| SettingsError::DateFormat {
        format: format.to_string(),
        reason: e.to_string(),
    })
}

/// Everything a handler may consult while resolving one token.
///
/// Cloning is cheap; every part is shared.
#[derive(Clone)]
pub struct ResolveContext {
    host: Arc<dyn Host>,
    accessors: Arc<Accessors>,
    rules: Arc<RuleSet>,
    settings: Arc<Settings>,
}

impl ResolveContext {
    pub fn new(
        host: Arc<dyn Host>,
        accessors: Arc<Accessors>,
        rules: Arc<RuleSet>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            host,
            accessors,
            rules,
            settings,
        }
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn accessors(&self) -> &Accessors {
        &self.accessors
    }

    pub fn capabilities(&self) -> &Capabilities {
        self.accessors.capabilities()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl fmt::Debug for ResolveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveContext")
            .field("version", &self.capabilities().version())
            .field("rules", &self.rules.len())
            .field("settings", &self.settings)
            .finish()
    }
}
