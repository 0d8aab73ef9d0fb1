//! # apphost - Application runtime
//!
//! Activates pluggable applications by identifier and drives their lifecycle:
//! - **Resolver**: identifier to constructor, construct + `init` as one step
//! - **Registry**: at most one live instance per identifier, lazily activated
//! - **Dispatch**: `install`, `configure` and `trigger_on_demand` on demand
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apphost::app::echo::register_echo;
//! use apphost::app::{AppDescriptor, Collaborators, Journal, Lifecycle};
//! use apphost::runtime::{AppRegistry, AppResolver};
//!
//! fn run(collaborators: Collaborators) -> apphost::Result<()> {
//!     let mut resolver = AppResolver::new();
//!     register_echo(&mut resolver, Journal::new())?;
//!
//!     let registry = AppRegistry::new(resolver, collaborators);
//!     let app = AppDescriptor::new("echo", "sample.echo");
//!     registry.invoke(&app, Lifecycle::Install)?;
//!     assert!(registry.is_active("sample.echo"));
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod monitoring;
pub mod runtime;

pub use crate::core::error::{Error, Result};
