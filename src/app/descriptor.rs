//! Application descriptors.
//!
//! The record a host hands over when it wants an application activated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the application's work runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    /// Runs inside the host process
    #[default]
    Internal,
    /// Runs outside the host, driven through it
    External,
}

/// Schedule attached to an application.
///
/// Carried for the application's own use; the runtime only runs on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSchedule {
    /// Schedule kind (e.g. "Scheduled", "OnDemand")
    pub schedule_type: String,
    /// Cron expression, when scheduled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
}

/// Descriptor of an application to activate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    /// Application ID
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Application name
    pub name: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Identifier of the implementation to load
    pub class_name: String,
    /// Application type
    #[serde(default)]
    pub app_type: AppType,
    /// Application-specific configuration
    #[serde(default)]
    pub app_configuration: serde_json::Value,
    /// Schedule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_schedule: Option<AppSchedule>,
}

impl AppDescriptor {
    /// Create a new descriptor.
    pub fn new(name: &str, class_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            display_name: None,
            class_name: class_name.to_string(),
            app_type: AppType::Internal,
            app_configuration: serde_json::Value::Null,
            app_schedule: None,
        }
    }

    /// Set display name.
    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    /// Set application type.
    pub fn with_app_type(mut self, app_type: AppType) -> Self {
        self.app_type = app_type;
        self
    }

    /// Set configuration.
    pub fn with_configuration(mut self, config: serde_json::Value) -> Self {
        self.app_configuration = config;
        self
    }

    /// Set schedule.
    pub fn with_schedule(mut self, schedule: AppSchedule) -> Self {
        self.app_schedule = Some(schedule);
        self
    }

    /// Identifier used to resolve and cache the implementation.
    pub fn identifier(&self) -> &str {
        &self.class_name
    }

    /// Deserialize the application configuration.
    pub fn configuration<T: for<'de> Deserialize<'de>>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.app_configuration.clone())
    }
}
