//! Service configuration.
//!
//! The host's configuration object, shared read-only with every application.

use crate::core::Result;
use crate::monitoring::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Service configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Cluster name
    pub cluster_name: String,
    /// Public URL of the service
    pub server_url: String,
    /// Logging configuration
    pub logging: LoggerConfig,
    /// Per-application private settings, keyed by application name
    pub apps: HashMap<String, serde_json::Value>,
}

impl ServiceConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Get an application's private settings.
    ///
    /// `Ok(None)` when the application has no settings; an error when the
    /// settings do not match `T`.
    pub fn app_config<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<Option<T>> {
        self.apps
            .get(name)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(Into::into)
    }

    /// Set an application's private settings.
    pub fn set_app_config(&mut self, name: &str, value: serde_json::Value) {
        self.apps.insert(name.to_string(), value);
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cluster_name: "apphost".to_string(),
            server_url: "http://localhost:8585".to_string(),
            logging: LoggerConfig::default(),
            apps: HashMap::new(),
        }
    }
}
