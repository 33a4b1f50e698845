//! # Publisher Configuration
//!
//! Layered configuration for the publisher and its logging: built-in defaults,
//! then an optional file (TOML, YAML or JSON by extension), then environment
//! overrides such as `IMPLEMENTORS__PENDING_SLOT=read_only` or
//! `IMPLEMENTORS__LOGGING__FORMAT=json`.
//!
//! ```rust,no_run
//! use implementors_registry::config::PublisherConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PublisherConfig::load(Some(Path::new("config/implementors.toml")))?;
//! println!("pending slot: {:?}", config.pending_slot);
//! # Ok(())
//! # }
//! ```

use crate::constants::env::{CONFIG_PREFIX, CONFIG_SEPARATOR};
use crate::error::ConfigurationError;
use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Whether the pending slot accepts writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotAccess {
    #[default]
    ReadWrite,
    /// Publishing without a hook is reported as an error
    ReadOnly,
}

impl SlotAccess {
    pub fn allows_pending(self) -> bool {
        matches!(self, SlotAccess::ReadWrite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; falls back to the environment's default level
    #[serde(default)]
    pub level: Option<String>,

    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublisherConfig {
    #[serde(default)]
    pub pending_slot: SlotAccess,

    /// Log a warning when a pending registry is replaced before anyone read it
    #[serde(default = "default_warn_on_overwrite")]
    pub warn_on_overwrite: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_warn_on_overwrite() -> bool {
    true
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            pending_slot: SlotAccess::default(),
            warn_on_overwrite: default_warn_on_overwrite(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PublisherConfig {
    /// Load defaults, then `path` if given, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        Self::load_with_env(path, None)
    }

    /// Environment-only configuration
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::load(None)
    }

    /// Like [`load`](Self::load) but reads overrides from `env` instead of the
    /// process environment when provided. Useful for tests.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigurationError> {
        let mut builder = Config::builder()
            .set_default("pending_slot", "read_write")?
            .set_default("warn_on_overwrite", default_warn_on_overwrite())?
            .set_default("logging.format", "pretty")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(CONFIG_PREFIX)
                .prefix_separator(CONFIG_SEPARATOR)
                .separator(CONFIG_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            pending_slot = ?config.pending_slot,
            warn_on_overwrite = config.warn_on_overwrite,
            log_format = ?config.logging.format,
            "Publisher configuration loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(level) = &self.logging.level {
            EnvFilter::try_new(level).map_err(|e| {
                ConfigurationError::invalid_value("logging.level", level.clone(), e.to_string())
            })?;
        }
        Ok(())
    }
}
