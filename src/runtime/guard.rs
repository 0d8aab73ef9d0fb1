//! Panic isolation for application code.
//!
//! Application code runs inside the host process; a panic in it must come
//! back to the caller as an ordinary [`AppError`] rather than unwind through
//! the runtime.

use crate::app::{AppError, AppResult};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Extract a human-readable message from a panic payload.
pub fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "non-string panic payload".to_string()
}

/// Run application code, turning a panic into [`AppError::Panicked`].
pub fn guard<T>(op: &str, f: impl FnOnce() -> AppResult<T>) -> AppResult<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let msg = panic_message(payload);
            tracing::error!(op, panic = %msg, "application panicked");
            Err(AppError::Panicked(msg))
        }
    }
}
