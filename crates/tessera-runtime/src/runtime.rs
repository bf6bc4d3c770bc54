//! The resolution entry point.
//!
//! [`ExpansionRuntime`] ties the layers together: it detects the host
//! version once, derives capabilities and accessors from it, and resolves
//! tokens through a [`Dispatcher`] holding the player placeholder table.
//!
//! ```rust,ignore
//! use tessera_runtime::ExpansionRuntime;
//!
//! let runtime = ExpansionRuntime::builder()
//!     .config_file("plugins/tessera/tessera.toml")
//!     .host(host)
//!     .build()?;
//!
//! let ping = runtime.resolve("colored_ping", Some(&player));
//! ```

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::{ConfigLoader, PlaceholderConfig, TesseraConfig, validate_config};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;
use tessera_core::{Accessors, Capabilities, EnvironmentVersion, Host, Subject, detect};
use tessera_framework::{Dispatcher, ResolveContext, Settings, SharedRuleSet, player};

/// A started placeholder expansion bound to one host.
pub struct ExpansionRuntime {
    host: Arc<dyn Host>,
    accessors: Arc<Accessors>,
    dispatcher: Dispatcher,
    rules: SharedRuleSet,
    /// Also guards rule swaps so a context never mixes old and new state.
    settings: RwLock<Arc<Settings>>,
}

impl ExpansionRuntime {
    /// Creates a runtime builder that loads configuration from files.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Starts resolution against `host`.
    ///
    /// Fails when the host version cannot be detected; no capability can be
    /// decided without it.
    pub fn start(host: Arc<dyn Host>, config: &TesseraConfig) -> RuntimeResult<Self> {
        validate_config(config)?;

        let version = detect(host.as_ref())?;
        let capabilities = Capabilities::for_version(version);
        let settings = settings_from(&config.placeholders)?;
        let rules = config.ping.rule_set(settings.color_marker());
        let dispatcher = player::dispatcher();

        info!(
            version = %version,
            capabilities = ?capabilities.iter().collect::<Vec<_>>(),
            rules = rules.len(),
            placeholders = dispatcher.static_count(),
            prefixes = dispatcher.prefix_count(),
            "Expansion started"
        );

        Ok(Self {
            host,
            accessors: Arc::new(Accessors::new(capabilities)),
            dispatcher,
            rules: SharedRuleSet::new(rules),
            settings: RwLock::new(Arc::new(settings)),
        })
    }

    /// Resolves one token, or `None` if no placeholder answers to it.
    pub fn resolve(&self, token: &str, subject: Option<&dyn Subject>) -> Option<String> {
        self.dispatcher.dispatch(&self.context(), token, subject)
    }

    /// A snapshot of the current resolution state.
    pub fn context(&self) -> ResolveContext {
        let settings = self.settings.read();
        ResolveContext::new(
            Arc::clone(&self.host),
            Arc::clone(&self.accessors),
            self.rules.snapshot(),
            Arc::clone(&settings),
        )
    }

    /// Applies new rendering settings and formatting rules.
    ///
    /// The detected version and accessor bindings are kept. Nothing changes
    /// if the new configuration is rejected.
    pub fn reload(&self, config: &TesseraConfig) -> RuntimeResult<()> {
        validate_config(config)?;
        let settings = settings_from(&config.placeholders)?;
        let rules = config.ping.rule_set(settings.color_marker());
        let count = rules.len();

        let mut current = self.settings.write();
        self.rules.replace(rules);
        *current = Arc::new(settings);

        debug!(rules = count, "Configuration reloaded");
        Ok(())
    }

    /// Registers additional placeholders next to the built-in table.
    pub fn extend(&mut self, register: impl FnOnce(&mut Dispatcher)) {
        register(&mut self.dispatcher);
        debug!(
            placeholders = self.dispatcher.static_count(),
            prefixes = self.dispatcher.prefix_count(),
            "Dispatcher extended"
        );
    }

    pub fn version(&self) -> EnvironmentVersion {
        self.accessors.capabilities().version()
    }

    pub fn capabilities(&self) -> &Capabilities {
        self.accessors.capabilities()
    }

    pub fn accessors(&self) -> &Accessors {
        &self.accessors
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

fn settings_from(config: &PlaceholderConfig) -> RuntimeResult<Settings> {
    Ok(Settings::new(
        &config.boolean_true,
        &config.boolean_false,
        &config.date_format,
        config.color_marker,
    )?)
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder that loads configuration, sets up logging and starts the runtime.
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
    host: Option<Arc<dyn Host>>,
    init_logging: bool,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new(),
            host: None,
            init_logging: true,
        }
    }

    /// Sets the host to resolve against. Required.
    pub fn host(mut self, host: Arc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile (e.g., "development", "production").
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: TesseraConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Whether to install the global tracing subscriber (default: true).
    ///
    /// Hosts that already own logging should turn this off.
    pub fn logging(mut self, enabled: bool) -> Self {
        self.init_logging = enabled;
        self
    }

    /// Loads the configuration and starts the runtime.
    pub fn build(self) -> RuntimeResult<ExpansionRuntime> {
        let host = self.host.ok_or(RuntimeError::MissingHost)?;
        let config = self.config_loader.load()?;
        if self.init_logging {
            logging::init_from_config(&config.logging);
        }
        ExpansionRuntime::start(host, &config)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
