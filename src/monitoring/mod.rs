//! Monitoring Module
//!
//! Observability for apphost: structured logging through `tracing`.

pub mod logging;

pub use logging::{LogFormat, LogLevel, LoggerConfig};
