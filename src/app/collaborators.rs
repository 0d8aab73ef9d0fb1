//! Host dependencies handed to every application constructor.

use crate::app::interface::AppResult;
use crate::config::ServiceConfig;
use std::any::Any;
use std::sync::Arc;

/// Handle to the host's data-access layer.
pub trait DataAccess: Send + Sync {
    /// Concrete handle, for applications that know the host's type.
    fn as_any(&self) -> &dyn Any;
}

/// Handle to the host's search layer.
pub trait SearchRepository: Send + Sync {
    /// Concrete handle, for applications that know the host's type.
    fn as_any(&self) -> &dyn Any;
}

/// The fixed bundle of host dependencies.
///
/// Passed unchanged into every construction; the runtime never looks inside.
#[derive(Clone)]
pub struct Collaborators {
    /// Data-access handle
    pub data_access: Arc<dyn DataAccess>,
    /// Search handle
    pub search: Arc<dyn SearchRepository>,
    /// Service configuration
    pub config: Arc<ServiceConfig>,
}

impl Collaborators {
    /// Create a new bundle.
    pub fn new(
        data_access: Arc<dyn DataAccess>,
        search: Arc<dyn SearchRepository>,
        config: Arc<ServiceConfig>,
    ) -> Self {
        Self {
            data_access,
            search,
            config,
        }
    }

    /// Downcast the data-access handle.
    pub fn data_access_as<T: Any>(&self) -> Option<&T> {
        self.data_access.as_any().downcast_ref()
    }

    /// Downcast the search handle.
    pub fn search_as<T: Any>(&self) -> Option<&T> {
        self.search.as_any().downcast_ref()
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Construction from the collaborator bundle.
///
/// Implemented by applications registered with
/// [`AppResolver::register_type`](crate::runtime::AppResolver::register_type).
pub trait FromCollaborators: Sized {
    /// Build an uninitialized instance.
    fn from_collaborators(collaborators: &Collaborators) -> AppResult<Self>;
}


#[cfg(test)]
mod tests {
    use super::testing::{collaborators, MemoryStore, NullSearch};

    #[test]
    fn test_downcast_handles() {
        let collab = collaborators();

        assert_eq!(collab.data_access_as::<MemoryStore>().unwrap().name, "memory");
        assert!(collab.search_as::<NullSearch>().is_some());
        assert!(collab.data_access_as::<NullSearch>().is_none());
    }

    #[test]
    fn test_clone_shares_handles() {
        let collab = collaborators();
        let copy = collab.clone();
        assert!(std::sync::Arc::ptr_eq(&collab.config, &copy.config));
    }
}
