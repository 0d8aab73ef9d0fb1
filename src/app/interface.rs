//! Application interface definition.
//!
//! Defines the lifecycle contract every pluggable application implements.

use crate::app::descriptor::AppDescriptor;
use crate::core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result type for application lifecycle operations.
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Error raised by application code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// The application reported a failure
    #[error("{0}")]
    Failed(String),

    /// The application does not implement this operation
    #[error("Operation not supported: {0}")]
    Unsupported(Lifecycle),

    /// The application's configuration was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The application panicked
    #[error("Application panicked: {0}")]
    Panicked(String),
}

impl AppError {
    /// Create a generic failure.
    pub fn failed(message: impl Into<String>) -> Self {
        AppError::Failed(message.into())
    }

    /// Create a configuration failure.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        AppError::InvalidConfiguration(message.into())
    }
}

/// Lifecycle operation dispatched against an active application.
///
/// `init` is not a selector; the resolver runs it once during activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Install the application
    Install,
    /// Apply the application's configuration
    Configure,
    /// Run the application once, outside any schedule
    TriggerOnDemand,
}

impl Lifecycle {
    /// All selectors, in dispatch order.
    pub const ALL: [Lifecycle; 3] = [
        Lifecycle::Install,
        Lifecycle::Configure,
        Lifecycle::TriggerOnDemand,
    ];

    /// Canonical name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Install => "install",
            Lifecycle::Configure => "configure",
            Lifecycle::TriggerOnDemand => "trigger_on_demand",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lifecycle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "install" => Ok(Lifecycle::Install),
            "configure" => Ok(Lifecycle::Configure),
            "trigger_on_demand" | "triggerOnDemand" => Ok(Lifecycle::TriggerOnDemand),
            other => Err(Error::UnknownLifecycle(other.to_string())),
        }
    }
}

/// Application trait that all pluggable applications must implement.
///
/// `init` receives exclusive access before the instance is shared; the
/// remaining operations run on a shared instance and may be called from
/// several threads, so state they touch needs interior mutability.
pub trait Application: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Initialize the application from the descriptor that activated it.
    fn init(&mut self, app: &AppDescriptor) -> AppResult<()>;

    /// Install the application.
    fn install(&self) -> AppResult<()> {
        Err(AppError::Unsupported(Lifecycle::Install))
    }

    /// Apply the application's configuration.
    fn configure(&self) -> AppResult<()> {
        Err(AppError::Unsupported(Lifecycle::Configure))
    }

    /// Run the application once.
    fn trigger_on_demand(&self) -> AppResult<()> {
        Err(AppError::Unsupported(Lifecycle::TriggerOnDemand))
    }

    /// Dispatch a lifecycle selector.
    fn run(&self, selector: Lifecycle) -> AppResult<()> {
        match selector {
            Lifecycle::Install => self.install(),
            Lifecycle::Configure => self.configure(),
            Lifecycle::TriggerOnDemand => self.trigger_on_demand(),
        }
    }
}
