//! Layered configuration loading with figment.
//!
//! Sources, each overriding the one before it:
//!
//! 1. [`TesseraConfig::default`]
//! 2. values handed to [`ConfigLoader::merge`]
//! 3. `tessera.<profile>.toml` next to the main file
//! 4. `tessera.toml` (or an explicit [`ConfigLoader::file`])
//! 5. `TESSERA_*` variables, `__` separating sections:
//!    `TESSERA_PING__COLORS__HIGH_THRESHOLD=150` sets `ping.colors.high_threshold`
//!
//! With no explicit search path the working directory is tried first, then
//! `<user config dir>/tessera`. YAML files are picked up too when the
//! `yaml-config` feature is on.

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::TesseraConfig;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TESSERA_";

/// File stems tried in each search directory, most preferred first.
const FILE_STEMS: [&str; 2] = ["tessera", "config"];

/// Extensions tried for each stem, in the order enabled formats are tried.
const EXTENSIONS: &[&str] = &[
    #[cfg(feature = "toml-config")]
    "toml",
    #[cfg(feature = "yaml-config")]
    "yaml",
    #[cfg(feature = "yaml-config")]
    "yml",
];

/// Named set of overrides layered under the main file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Development,
    Production,
    Custom(String),
}

impl Profile {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Case-insensitive; `dev` and `prod` are accepted as short forms.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Profile named by `TESSERA_PROFILE`, if set.
    pub fn from_env() -> Self {
        std::env::var(format!("{ENV_PREFIX}PROFILE"))
            .map(|p| Self::parse(&p))
            .unwrap_or_default()
    }
}

/// Collects configuration sources and extracts a [`TesseraConfig`].
pub struct ConfigLoader {
    overrides: Figment,
    profile: Profile,
    search_paths: Vec<PathBuf>,
    file: Option<PathBuf>,
    env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            overrides: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            file: None,
            env: true,
        }
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Profile::parse(&profile.into());
        self
    }

    /// Adds a directory to search. Once any is given, the default
    /// directories are no longer searched.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Loads exactly this file instead of searching. It must exist.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Ignores `TESSERA_*` variables.
    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    pub fn merge(mut self, config: TesseraConfig) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(config));
        self
    }

    pub fn load(self) -> ConfigResult<TesseraConfig> {
        let mut figment = Figment::from(Serialized::defaults(TesseraConfig::default()))
            .merge(self.overrides.clone());

        match &self.file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.clone()));
                }
                info!(path = %path.display(), "Loading configuration file");
                figment = merge_file(figment, path)?;
            }
            None => figment = self.merge_discovered(figment)?,
        }

        if self.env {
            trace!(prefix = ENV_PREFIX, "Reading environment overrides");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        let config: TesseraConfig = figment.extract()?;
        debug!(
            profile = self.profile.as_str(),
            level = %config.logging.level,
            ping_rules = config.ping.formatting.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    fn directories(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::config_dir().map(|dir| dir.join("tessera")))
            .collect()
    }

    /// Merges the first main file found, preceded by its profile file.
    fn merge_discovered(&self, figment: Figment) -> ConfigResult<Figment> {
        for dir in self.directories() {
            for stem in FILE_STEMS {
                for ext in EXTENSIONS {
                    let main = dir.join(format!("{stem}.{ext}"));
                    if !main.exists() {
                        continue;
                    }

                    let mut figment = figment;
                    let profiled = dir.join(format!("{stem}.{}.{ext}", self.profile.as_str()));
                    if profiled.exists() {
                        debug!(path = %profiled.display(), "Loading profile configuration");
                        figment = merge_file(figment, &profiled)?;
                    }
                    info!(path = %main.display(), "Loading configuration file");
                    return merge_file(figment, &main);
                }
            }
        }
        warn!("No configuration file found, using defaults");
        Ok(figment)
    }
}

/// Merges one file, picking the provider from its extension.
fn merge_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        #[cfg(feature = "toml-config")]
        "toml" => Ok(figment.merge(Toml::file(path))),
        #[cfg(feature = "yaml-config")]
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;
    use crate::config::schema::{FormattingEntry, LogLevel, PlaceholderConfig};

    #[test]
    fn test_default_config() {
        Jail::expect_with(|jail| {
            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.logging.level.as_str(), "info");
            assert_eq!(config.placeholders.boolean_true, "yes");
            assert_eq!(config.placeholders.color_marker, '§');
            assert!(config.ping.formatting.is_empty());
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_keeps_rule_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tessera.toml",
                r#"
                [placeholders]
                boolean_true = "true"

                [[ping.formatting]]
                when = ">200"
                format = "&4"

                [[ping.formatting]]
                when = ">100"
                format = "&e"

                [[ping.formatting]]
                when = "=0"
                format = "&9"
                "#,
            )?;

            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.placeholders.boolean_true, "true");
            assert_eq!(config.placeholders.boolean_false, "no");
            assert_eq!(
                config.ping.formatting,
                vec![
                    FormattingEntry::new(">200", "&4"),
                    FormattingEntry::new(">100", "&e"),
                    FormattingEntry::new("=0", "&9"),
                ]
            );
            Ok(())
        });
    }

    #[test]
    fn test_profile_file_is_overridden_by_main_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tessera.production.toml",
                "[logging]\nlevel = \"warn\"\nthread_ids = true\n",
            )?;
            jail.create_file("tessera.toml", "[logging]\nlevel = \"debug\"\n")?;

            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .profile("prod")
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.logging.level, LogLevel::Debug);
            assert!(config.logging.thread_ids);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("tessera.toml", "[logging]\nlevel = \"debug\"\n")?;
            jail.set_env("TESSERA_LOGGING__LEVEL", "error");
            jail.set_env("TESSERA_PING__COLORS__HIGH_THRESHOLD", "150");

            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.logging.level, LogLevel::Error);
            assert_eq!(config.ping.colors.high_threshold, 150);
            Ok(())
        });
    }

    #[test]
    fn test_merge_overrides_defaults() {
        Jail::expect_with(|jail| {
            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .without_env()
                .merge(TesseraConfig {
                    placeholders: PlaceholderConfig {
                        boolean_true: "on".into(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(config.placeholders.boolean_true, "on");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ConfigLoader::new()
            .file("/definitely/not/here/tessera.toml")
            .without_env()
            .load();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_profile_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("TESSERA_PROFILE", "production");
            assert_eq!(Profile::from_env(), Profile::Production);
            jail.set_env("TESSERA_PROFILE", "Staging");
            assert_eq!(Profile::from_env(), Profile::Custom("staging".into()));
            Ok(())
        });
    }
}
