//! # Registry Publisher
//!
//! Hands a fully built [`Registry`] to whichever consumer is available: the
//! registration hook if one is installed, otherwise the pending slot.
//!
//! ## Usage
//!
//! ```rust
//! use implementors_registry::context::HostContext;
//! use implementors_registry::publisher::{Publication, RegistryPublisher};
//! use implementors_registry::registry::Registry;
//!
//! let context = HostContext::new();
//! let publisher = RegistryPublisher::default();
//!
//! let registry = Registry::from_static(&[("ethcore_db", &["impl Drop for Database"])]).unwrap();
//! let outcome = publisher.publish(&context, registry).unwrap();
//!
//! assert_eq!(outcome, Publication::Deferred { displaced_previous: false });
//! assert!(context.has_pending());
//! ```

use crate::config::PublisherConfig;
use crate::context::{Handoff, HostContext};
use crate::error::PublishError;
use crate::logging::{log_error, log_registry_operation};
use crate::registry::Registry;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// How a registry left the publisher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Publication {
    /// The hook was invoked with the registry
    Delivered,
    /// The registry now sits in the pending slot
    Deferred { displaced_previous: bool },
}

/// Counters for every publication attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublisherStats {
    pub delivered: u64,
    pub deferred: u64,
    /// Pending registries overwritten before consumption
    pub displaced: u64,
    pub rejected: u64,
    pub last_published_at: Option<DateTime<Utc>>,
}

impl PublisherStats {
    pub fn total_published(&self) -> u64 {
        self.delivered + self.deferred
    }
}

/// Publishes registries into a [`HostContext`]
#[derive(Debug, Default)]
pub struct RegistryPublisher {
    config: PublisherConfig,
    stats: Mutex<PublisherStats>,
}

impl RegistryPublisher {
    pub fn new(config: PublisherConfig) -> Self {
        Self {
            config,
            stats: Mutex::new(PublisherStats::default()),
        }
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Build a context whose slot access follows this publisher's configuration
    pub fn context(&self) -> HostContext {
        HostContext::with_access(self.config.pending_slot)
    }

    /// Hand `registry` to the hook, or park it in the pending slot.
    ///
    /// The hook runs synchronously on the caller's thread; a panic inside it
    /// propagates. Fails only when no hook is installed and either this
    /// publisher's configuration or the context marks the slot read-only.
    pub fn publish(
        &self,
        context: &HostContext,
        registry: Registry,
    ) -> Result<Publication, PublishError> {
        let groups = registry.len();
        let descriptors = registry.descriptor_count();
        if registry.is_empty() {
            debug!("Publishing empty registry");
        }

        let registry = Arc::new(registry);

        match context.route(Arc::clone(&registry), self.config.pending_slot) {
            Handoff::Deliver(hook) => {
                self.record(|stats| stats.delivered += 1);
                log_registry_operation("publish", groups, descriptors, "delivered", None);
                hook(registry);
                Ok(Publication::Delivered)
            }
            Handoff::Deferred { displaced } => {
                let displaced_previous = displaced.is_some();
                self.record(|stats| {
                    stats.deferred += 1;
                    if displaced_previous {
                        stats.displaced += 1;
                    }
                });

                if let Some(previous) = displaced {
                    if self.config.warn_on_overwrite {
                        warn!(
                            previous_groups = previous.len(),
                            previous_descriptors = previous.descriptor_count(),
                            "Pending registry replaced before it was consumed"
                        );
                    }
                }

                log_registry_operation("publish", groups, descriptors, "deferred", None);
                Ok(Publication::Deferred { displaced_previous })
            }
            Handoff::Refused => {
                self.stats.lock().rejected += 1;
                let err = PublishError::PendingSlotReadOnly;
                log_error("RegistryPublisher", "publish", &err.to_string(), None);
                Err(err)
            }
        }
    }

    pub fn stats(&self) -> PublisherStats {
        self.stats.lock().clone()
    }

    fn record(&self, update: impl FnOnce(&mut PublisherStats)) {
        let mut stats = self.stats.lock();
        update(&mut stats);
        stats.last_published_at = Some(Utc::now());
    }
}

/// Publish with a default-configured publisher
pub fn publish(context: &HostContext, registry: Registry) -> Result<Publication, PublishError> {
    RegistryPublisher::default().publish(context, registry)
}
