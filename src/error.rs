//! # Error Types
//!
//! Structured errors for registry construction, publication, snippet parsing
//! and configuration loading.

use thiserror::Error;

/// Errors raised while building or decoding a [`Registry`](crate::registry::Registry)
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Group name cannot be empty")]
    EmptyGroupName,

    #[error("Group '{group}' is already present in the registry")]
    DuplicateGroup { group: String },

    #[error("Registry JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by [`RegistryPublisher::publish`](crate::publisher::RegistryPublisher::publish)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// No hook is installed and the context refuses pending writes
    #[error("No registration hook is installed and the pending slot is read-only")]
    PendingSlotReadOnly,
}

/// Errors raised while reading a registration snippet
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Snippet does not start with the implementors prelude")]
    MissingPrelude,

    #[error("Snippet does not end with the registration call")]
    MissingEpilogue,

    #[error("Malformed snippet line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised while loading or validating [`PublisherConfig`](crate::config::PublisherConfig)
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl ConfigurationError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-level error covering every fallible operation
#[derive(Debug, Error)]
pub enum ImplementorsError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T> = std::result::Result<T, ImplementorsError>;
