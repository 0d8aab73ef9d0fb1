//! Runtime Module
//!
//! Activates applications and drives their lifecycle:
//! - Resolver (identifier to constructor)
//! - Registry and dispatcher (one live instance per identifier)
//! - Panic isolation around application code

pub mod guard;
pub mod registry;
pub mod resolver;

pub use registry::{ActiveApp, AppRegistry};
pub use resolver::{AppFactory, AppResolver};
