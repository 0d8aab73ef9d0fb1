//! Error types for apphost.

use crate::app::{AppError, Lifecycle};
use thiserror::Error;

/// Result type alias for apphost operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in apphost operations.
#[derive(Error, Debug)]
pub enum Error {
    // Resolution errors
    #[error("Application type not found: {0}")]
    TypeNotFound(String),

    #[error("Construction of application {identifier} failed: {source}")]
    ConstructionFailed {
        identifier: String,
        #[source]
        source: AppError,
    },

    #[error("Initialization of application {identifier} failed: {source}")]
    InitFailed {
        identifier: String,
        #[source]
        source: AppError,
    },

    #[error("Application {0} is already registered")]
    DuplicateRegistration(String),

    // Dispatch errors
    #[error("Activation of application {identifier} failed: {source}")]
    ActivationFailed {
        identifier: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{selector} failed for application {identifier}: {source}")]
    InvocationFailed {
        identifier: String,
        selector: Lifecycle,
        #[source]
        source: AppError,
    },

    #[error("Unknown lifecycle operation: {0}")]
    UnknownLifecycle(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The plugin-side error behind this failure, if the plugin produced one.
    pub fn cause(&self) -> Option<&AppError> {
        match self {
            Error::ConstructionFailed { source, .. }
            | Error::InitFailed { source, .. }
            | Error::InvocationFailed { source, .. } => Some(source),
            Error::ActivationFailed { source, .. } => source.cause(),
            _ => None,
        }
    }

    /// Identifier of the application this error concerns, if any.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Error::TypeNotFound(id) | Error::DuplicateRegistration(id) => Some(id),
            Error::ConstructionFailed { identifier, .. }
            | Error::InitFailed { identifier, .. }
            | Error::ActivationFailed { identifier, .. }
            | Error::InvocationFailed { identifier, .. } => Some(identifier),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
