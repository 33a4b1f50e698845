#![allow(clippy::doc_markdown)] // Allow technical terms like rustdoc, JSON in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Implementors Registry
//!
//! Deferred-registration publisher for trait implementor tables.
//!
//! ## Overview
//!
//! A documentation page ships a static table mapping each crate to the
//! pre-rendered "implementors" of a trait. The table is handed to the page's
//! index widget through a registration hook; when the widget has not loaded
//! yet, the table waits in a single pending slot until the widget picks it up.
//!
//! This crate models that handoff with an explicit [`HostContext`] instead of
//! page-wide globals, so producers and consumers can be wired together (and
//! tested) without any shared mutable state.
//!
//! ## Module Organization
//!
//! - [`registry`] - Registry and Descriptor data model
//! - [`context`] - Injectable hook and pending slot
//! - [`publisher`] - The publish operation and its statistics
//! - [`script`] - Render and read the browser registration snippet
//! - [`config`] - Layered publisher configuration
//! - [`logging`] - Structured logging setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use implementors_registry::{publish, HostContext, Publication, Registry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::from_static(&[
//!     ("alpha", &["impl X for Y"]),
//!     ("beta", &["impl A for B", "impl A for C"]),
//! ])?;
//!
//! let context = HostContext::new();
//! assert!(matches!(publish(&context, registry)?, Publication::Deferred { .. }));
//!
//! // The index widget comes up later and drains the pending slot
//! let delivered = context.install_hook(|registry| {
//!     assert_eq!(registry.descriptor_count(), 3);
//! });
//! assert!(delivered);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod logging;
pub mod publisher;
pub mod registry;
pub mod script;

pub use config::{LogFormat, LoggingConfig, PublisherConfig, SlotAccess};
pub use context::{HostContext, RegistrationHook};
pub use error::{
    ConfigurationError, ImplementorsError, PublishError, RegistryError, Result, ScriptError,
};
pub use publisher::{publish, Publication, PublisherStats, RegistryPublisher};
pub use registry::{Descriptor, Registry, RegistryBuilder};
pub use script::{parse_script, render_script};
