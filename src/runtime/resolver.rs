//! Application resolver.
//!
//! Maps identifiers to constructors, and turns an identifier plus the
//! collaborator bundle into an initialized application.

use crate::app::{AppDescriptor, AppResult, Application, Collaborators, FromCollaborators};
use crate::core::{Error, Result};
use crate::runtime::guard::guard;
use std::collections::HashMap;
use std::sync::Arc;

/// Constructor stored for an identifier.
pub type AppFactory =
    Arc<dyn Fn(&Collaborators) -> AppResult<Box<dyn Application>> + Send + Sync>;

/// Table of known application constructors.
#[derive(Clone, Default)]
pub struct AppResolver {
    factories: HashMap<String, AppFactory>,
}

impl AppResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under an identifier.
    pub fn register<F, A>(&mut self, identifier: &str, factory: F) -> Result<()>
    where
        F: Fn(&Collaborators) -> AppResult<A> + Send + Sync + 'static,
        A: Application + 'static,
    {
        if self.factories.contains_key(identifier) {
            return Err(Error::DuplicateRegistration(identifier.to_string()));
        }

        let factory: AppFactory = Arc::new(move |collaborators: &Collaborators| {
            factory(collaborators).map(|app| Box::new(app) as Box<dyn Application>)
        });
        self.factories.insert(identifier.to_string(), factory);
        tracing::debug!(app = identifier, "registered application factory");
        Ok(())
    }

    /// Register a type constructed through [`FromCollaborators`].
    pub fn register_type<A>(&mut self, identifier: &str) -> Result<()>
    where
        A: Application + FromCollaborators + 'static,
    {
        self.register(identifier, A::from_collaborators)
    }

    /// Check whether an identifier is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered identifiers.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Construct and initialize the application registered under `identifier`.
    ///
    /// The instance is only returned once `init` has succeeded.
    pub fn resolve(
        &self,
        identifier: &str,
        collaborators: &Collaborators,
        descriptor: &AppDescriptor,
    ) -> Result<Box<dyn Application>> {
        let factory = self
            .factories
            .get(identifier)
            .ok_or_else(|| Error::TypeNotFound(identifier.to_string()))?;

        let mut app = guard("construct", || factory(collaborators)).map_err(|source| {
            Error::ConstructionFailed {
                identifier: identifier.to_string(),
                source,
            }
        })?;

        guard("init", || app.init(descriptor)).map_err(|source| Error::InitFailed {
            identifier: identifier.to_string(),
            source,
        })?;

        Ok(app)
    }
}

impl std::fmt::Debug for AppResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppResolver")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}
