//! # Host Context
//!
//! Explicit replacement for the page-wide globals the registration snippet
//! relies on: an optional registration hook and a single pending slot.
//!
//! ## Handoff contract
//!
//! - Producers call [`publish`](crate::publisher::publish). With a hook installed the
//!   registry goes straight to it; otherwise it waits in the pending slot, replacing
//!   whatever was waiting before.
//! - The consumer calls [`HostContext::install_hook`]. Installation and draining of the
//!   pending slot happen under one lock, so a registry published concurrently is either
//!   seen by the new hook directly or drained from the slot. Nothing is lost.
//! - Hooks always run outside the lock and may re-enter the context.

use crate::config::SlotAccess;
use crate::registry::Registry;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Callback the consumer exposes to receive a registry immediately
pub type RegistrationHook = Arc<dyn Fn(Arc<Registry>) + Send + Sync>;

/// What the context decided for one publication, resolved under the lock
pub(crate) enum Handoff {
    /// Deliver to this hook once the lock is released
    Deliver(RegistrationHook),
    /// Stored in the pending slot
    Deferred { displaced: Option<Arc<Registry>> },
    /// No hook and the slot refuses writes
    Refused,
}

struct HostState {
    hook: Option<RegistrationHook>,
    pending: Option<Arc<Registry>>,
}

/// Injectable stand-in for the host's shared hook and pending slot
pub struct HostContext {
    state: Mutex<HostState>,
    access: SlotAccess,
}

impl HostContext {
    /// Context with no hook and a writable pending slot
    pub fn new() -> Self {
        Self::with_access(SlotAccess::ReadWrite)
    }

    pub fn with_access(access: SlotAccess) -> Self {
        Self {
            state: Mutex::new(HostState {
                hook: None,
                pending: None,
            }),
            access,
        }
    }

    /// Context whose hook is already available
    pub fn with_hook<F>(hook: F) -> Self
    where
        F: Fn(Arc<Registry>) + Send + Sync + 'static,
    {
        let context = Self::new();
        context.state.lock().hook = Some(Arc::new(hook));
        context
    }

    /// Context with explicit initial state, e.g. a host that already holds
    /// both a hook and an unconsumed registry
    pub fn from_parts(
        hook: Option<RegistrationHook>,
        pending: Option<Registry>,
        access: SlotAccess,
    ) -> Self {
        Self {
            state: Mutex::new(HostState {
                hook,
                pending: pending.map(Arc::new),
            }),
            access,
        }
    }

    pub fn access(&self) -> SlotAccess {
        self.access
    }

    pub fn has_hook(&self) -> bool {
        self.state.lock().hook.is_some()
    }

    /// Peek at the pending registry without consuming it
    pub fn pending(&self) -> Option<Arc<Registry>> {
        self.state.lock().pending.clone()
    }

    pub fn has_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    /// Remove and return the pending registry; a second call yields `None`
    pub fn take_pending(&self) -> Option<Arc<Registry>> {
        let taken = self.state.lock().pending.take();
        if let Some(registry) = &taken {
            debug!(groups = registry.len(), "Pending registry consumed");
        }
        taken
    }

    /// Install the consumer hook and hand it any registry that was waiting.
    ///
    /// Returns `true` when a pending registry was delivered. A previously
    /// installed hook is replaced.
    pub fn install_hook<F>(&self, hook: F) -> bool
    where
        F: Fn(Arc<Registry>) + Send + Sync + 'static,
    {
        let hook: RegistrationHook = Arc::new(hook);

        let drained = {
            let mut state = self.state.lock();
            state.hook = Some(Arc::clone(&hook));
            state.pending.take()
        };

        match drained {
            Some(registry) => {
                info!(
                    groups = registry.len(),
                    descriptors = registry.descriptor_count(),
                    "Registration hook installed, delivering pending registry"
                );
                hook(registry);
                true
            }
            None => {
                info!("Registration hook installed, nothing pending");
                false
            }
        }
    }

    /// Uninstall the hook; later publications are deferred again
    pub fn remove_hook(&self) -> bool {
        self.state.lock().hook.take().is_some()
    }

    /// Decide the route for `registry` under the lock.
    ///
    /// The slot is written only when both this context and the caller's
    /// `access` allow it.
    pub(crate) fn route(&self, registry: Arc<Registry>, access: SlotAccess) -> Handoff {
        let mut state = self.state.lock();

        if let Some(hook) = &state.hook {
            return Handoff::Deliver(Arc::clone(hook));
        }

        if self.access.allows_pending() && access.allows_pending() {
            Handoff::Deferred {
                displaced: state.pending.replace(registry),
            }
        } else {
            Handoff::Refused
        }
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("HostContext")
            .field("hook", &state.hook.as_ref().map(|_| "<RegistrationHook>"))
            .field("pending", &state.pending)
            .field("access", &self.access)
            .finish()
    }
}
