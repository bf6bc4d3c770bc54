//! Configuration validation utilities.

use tessera_framework::context::parse_date_format;
use tessera_framework::format::color::ALTERNATE_CHAR;

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, LoggingConfig, PingConfig, PlaceholderConfig, TesseraConfig};

/// Validates the entire configuration.
///
/// Formatting conditions are not checked here: a malformed condition is
/// skipped with a warning when the rule set is built.
pub fn validate_config(config: &TesseraConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_placeholder_config(&config.placeholders)?;
    validate_ping_config(&config.ping)?;
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.filters.keys().any(|module| module.trim().is_empty()) {
        return Err(ConfigError::validation(
            "logging.filters cannot contain an empty module name",
        ));
    }
    if logging.output == LogOutput::File
        && logging
            .file_path
            .as_ref()
            .is_some_and(|path| path.file_name().is_none())
    {
        return Err(ConfigError::validation(
            "logging.file_path must name a file",
        ));
    }
    Ok(())
}

fn validate_placeholder_config(placeholders: &PlaceholderConfig) -> ConfigResult<()> {
    parse_date_format(&placeholders.date_format)
        .map_err(|e| ConfigError::validation(format!("placeholders.date_format: {e}")))?;

    let marker = placeholders.color_marker;
    if marker.is_whitespace() || marker.is_alphanumeric() || marker == ALTERNATE_CHAR {
        return Err(ConfigError::validation(format!(
            "placeholders.color_marker cannot be {marker:?}"
        )));
    }
    Ok(())
}

fn validate_ping_config(ping: &PingConfig) -> ConfigResult<()> {
    let colors = &ping.colors;
    if colors.medium_threshold > colors.high_threshold {
        return Err(ConfigError::validation(format!(
            "ping.colors.medium_threshold ({}) must not exceed high_threshold ({})",
            colors.medium_threshold, colors.high_threshold
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::FormattingEntry;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TesseraConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_date_format() {
        let mut config = TesseraConfig::default();
        config.placeholders.date_format = "[hour".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("date_format"));
    }

    #[test]
    fn test_bad_color_marker() {
        for marker in ['&', ' ', 'x', '7'] {
            let mut config = TesseraConfig::default();
            config.placeholders.color_marker = marker;
            assert!(
                matches!(
                    validate_config(&config),
                    Err(ConfigError::ValidationError { .. })
                ),
                "marker {marker:?} accepted"
            );
        }
    }

    #[test]
    fn test_inverted_thresholds() {
        let mut config = TesseraConfig::default();
        config.ping.colors.medium_threshold = 200;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_log_file_path_must_name_a_file() {
        let mut config = TesseraConfig::default();
        config.logging.file_path = Some("/".into());
        assert!(validate_config(&config).is_ok());
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());
        config.logging.file_path = Some("logs/tessera.log".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_filter_module() {
        let mut config = TesseraConfig::default();
        config
            .logging
            .filters
            .insert(" ".into(), crate::config::LogLevel::Debug);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_malformed_rules_are_not_fatal() {
        let mut config = TesseraConfig::default();
        config.ping.formatting = vec![FormattingEntry::new("~~", "&c")];
        assert!(validate_config(&config).is_ok());
    }
}
