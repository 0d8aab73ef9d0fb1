//! Application registry.
//!
//! Holds at most one live instance per identifier and dispatches lifecycle
//! operations against it, activating the application on first use.

use crate::app::{AppDescriptor, Application, Collaborators, Lifecycle};
use crate::core::{now, Error, Result, Timestamp};
use crate::runtime::guard::guard;
use crate::runtime::resolver::AppResolver;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

/// A live, initialized application.
pub struct ActiveApp {
    identifier: String,
    name: String,
    activated_at: Timestamp,
    app: Box<dyn Application>,
}

impl ActiveApp {
    /// Identifier the instance is cached under.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Name of the descriptor that activated it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Activation time.
    pub fn activated_at(&self) -> Timestamp {
        self.activated_at
    }

    /// The application itself.
    pub fn app(&self) -> &dyn Application {
        self.app.as_ref()
    }
}

impl std::fmt::Debug for ActiveApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveApp")
            .field("identifier", &self.identifier)
            .field("name", &self.name)
            .field("activated_at", &self.activated_at)
            .finish_non_exhaustive()
    }
}

/// Per-identifier slot. The gate serializes activation; the cell is set once.
#[derive(Default)]
struct Slot {
    instance: OnceLock<Arc<ActiveApp>>,
    gate: Mutex<()>,
}

/// Registry of active applications.
pub struct AppRegistry {
    resolver: AppResolver,
    collaborators: Collaborators,
    slots: RwLock<HashMap<String, Arc<Slot>>>,
}

impl AppRegistry {
    /// Create a registry resolving through `resolver`.
    pub fn new(resolver: AppResolver, collaborators: Collaborators) -> Self {
        Self {
            resolver,
            collaborators,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Run a lifecycle operation, activating the application if needed.
    ///
    /// A failed operation leaves the instance cached, so it can be retried.
    pub fn invoke(&self, descriptor: &AppDescriptor, selector: Lifecycle) -> Result<()> {
        let active = self.activate(descriptor)?;
        let identifier = active.identifier();

        tracing::debug!(app = identifier, selector = %selector, "dispatching");
        guard(selector.as_str(), || active.app.run(selector)).map_err(|source| {
            tracing::error!(app = identifier, selector = %selector, error = %source, "lifecycle call failed");
            Error::InvocationFailed {
                identifier: identifier.to_string(),
                selector,
                source,
            }
        })
    }

    /// Install an application.
    pub fn install(&self, descriptor: &AppDescriptor) -> Result<()> {
        self.invoke(descriptor, Lifecycle::Install)
    }

    /// Configure an application.
    pub fn configure(&self, descriptor: &AppDescriptor) -> Result<()> {
        self.invoke(descriptor, Lifecycle::Configure)
    }

    /// Run an application once.
    pub fn trigger_on_demand(&self, descriptor: &AppDescriptor) -> Result<()> {
        self.invoke(descriptor, Lifecycle::TriggerOnDemand)
    }

    /// Run [`invoke`](Self::invoke) on tokio's blocking pool.
    pub async fn invoke_async(
        self: Arc<Self>,
        descriptor: AppDescriptor,
        selector: Lifecycle,
    ) -> Result<()> {
        tokio::task::spawn_blocking(move || self.invoke(&descriptor, selector))
            .await
            .map_err(|e| Error::Internal(format!("lifecycle task failed: {e}")))?
    }

    /// Get the live instance for an identifier.
    pub fn lookup(&self, identifier: &str) -> Option<Arc<ActiveApp>> {
        let slot = self.read_slots().get(identifier).cloned()?;
        slot.instance.get().cloned()
    }

    /// Check whether an identifier has a live instance.
    pub fn is_active(&self, identifier: &str) -> bool {
        self.lookup(identifier).is_some()
    }

    /// Identifiers with a live instance, sorted.
    pub fn active_apps(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .read_slots()
            .iter()
            .filter(|(_, slot)| slot.instance.get().is_some())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.read_slots()
            .values()
            .filter(|slot| slot.instance.get().is_some())
            .count()
    }

    /// Whether no instance is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget an application's instance.
    ///
    /// Returns whether a live instance was dropped. Removing an unknown
    /// identifier is not an error.
    ///
    /// An identifier whose activation is still in flight is not active yet,
    /// so its slot is left alone.
    pub fn uninstall(&self, identifier: &str) -> bool {
        let was_active = {
            let mut slots = self.write_slots();
            let active = slots
                .get(identifier)
                .is_some_and(|slot| slot.instance.get().is_some());
            if active {
                slots.remove(identifier);
            }
            active
        };

        if was_active {
            tracing::info!(app = identifier, "application uninstalled");
        }
        was_active
    }

    /// Resolver used for activation.
    pub fn resolver(&self) -> &AppResolver {
        &self.resolver
    }

    /// Collaborators handed to every constructor.
    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    fn activate(&self, descriptor: &AppDescriptor) -> Result<Arc<ActiveApp>> {
        let identifier = descriptor.identifier();

        loop {
            let slot = self.slot(identifier);

            if let Some(active) = slot.instance.get() {
                tracing::debug!(app = identifier, "using cached instance");
                return Ok(Arc::clone(active));
            }

            if let Some(activated) = self.activate_in(&slot, descriptor) {
                return activated;
            }
        }
    }

    /// Activate through one slot. `None` means the slot was pruned while we
    /// waited on its gate and the caller should start over on a fresh one.
    fn activate_in(
        &self,
        slot: &Arc<Slot>,
        descriptor: &AppDescriptor,
    ) -> Option<Result<Arc<ActiveApp>>> {
        let identifier = descriptor.identifier();

        let activated = {
            let _gate = slot.gate.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(active) = slot.instance.get() {
                // Another caller won the race while we waited.
                return Some(Ok(Arc::clone(active)));
            }
            if !self.is_current(identifier, slot) {
                return None;
            }

            self.resolver
                .resolve(identifier, &self.collaborators, descriptor)
                .map(|app| {
                    let active = Arc::new(ActiveApp {
                        identifier: identifier.to_string(),
                        name: descriptor.name.clone(),
                        activated_at: now(),
                        app,
                    });
                    tracing::info!(app = identifier, name = %descriptor.name, "application activated");
                    Arc::clone(slot.instance.get_or_init(|| active))
                })
        };

        Some(activated.map_err(|source| {
            tracing::error!(app = identifier, error = %source, "application activation failed");
            self.prune(identifier, slot);
            Error::ActivationFailed {
                identifier: identifier.to_string(),
                source: Box::new(source),
            }
        }))
    }

    fn is_current(&self, identifier: &str, slot: &Arc<Slot>) -> bool {
        self.read_slots()
            .get(identifier)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    fn slot(&self, identifier: &str) -> Arc<Slot> {
        if let Some(slot) = self.read_slots().get(identifier) {
            return Arc::clone(slot);
        }
        Arc::clone(
            self.write_slots()
                .entry(identifier.to_string())
                .or_default(),
        )
    }

    /// Drop a slot left empty by a failed activation, unless someone else is
    /// activating through it.
    fn prune(&self, identifier: &str, slot: &Arc<Slot>) {
        let mut slots = self.write_slots();
        let idle_and_empty = slots
            .get(identifier)
            .filter(|current| Arc::ptr_eq(current, slot))
            .map(|current| current.instance.get().is_none() && current.gate.try_lock().is_ok())
            .unwrap_or(false);
        if idle_and_empty {
            slots.remove(identifier);
        }
    }

    fn read_slots(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Slot>>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slots(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<Slot>>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for AppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRegistry")
            .field("resolver", &self.resolver)
            .field("active", &self.active_apps())
            .finish()
    }
}
