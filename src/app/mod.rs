//! Application Module
//!
//! The contract between the runtime and pluggable applications:
//! - Application interface and lifecycle selectors
//! - Descriptors
//! - Host collaborators
//! - Echo application

pub mod collaborators;
pub mod descriptor;
pub mod echo;
pub mod interface;

pub use collaborators::{Collaborators, DataAccess, FromCollaborators, SearchRepository};
pub use descriptor::{AppDescriptor, AppSchedule, AppType};
pub use echo::{EchoApp, Journal, ECHO_IDENTIFIER};
pub use interface::{AppError, AppResult, Application, Lifecycle};
