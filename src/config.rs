//! Explicit gateway configuration. Profiles are plain data handed to the
//! constructor; there is no process-wide registry lookup inside the core.

use serde::Deserialize;

use crate::error::TableGatewayError;
use crate::types::DriverKind;

/// A named connection profile: which driver to use and how to reach the
/// database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionProfile {
    pub name: String,
    pub driver: DriverKind,
    pub connection_string: String,
}

impl ConnectionProfile {
    pub fn new(
        name: impl Into<String>,
        driver: DriverKind,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            driver,
            connection_string: connection_string.into(),
        }
    }
}

/// A set of connection profiles, typically deserialized from application
/// configuration.
///
/// ```rust
/// use table_gateway::GatewayConfig;
///
/// let config = GatewayConfig::from_json(
///     r#"{"profiles":[{"name":"main","driver":"sqlite","connection_string":"app.db"}]}"#,
/// ).unwrap();
/// assert!(config.profile("main").is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    profiles: Vec<ConnectionProfile>,
}

impl GatewayConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_profile(mut self, profile: ConnectionProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Deserialize a configuration from JSON text.
    ///
    /// # Errors
    /// Returns `ConfigError` if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, TableGatewayError> {
        serde_json::from_str(text).map_err(|e| {
            TableGatewayError::ConfigError(format!("invalid gateway configuration: {e}"))
        })
    }

    /// Resolve a profile by name.
    ///
    /// # Errors
    /// Returns `ConfigError` if no profile carries the given name.
    pub fn profile(&self, name: &str) -> Result<&ConnectionProfile, TableGatewayError> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| {
                TableGatewayError::ConfigError(format!(
                    "can't find a connection profile named '{name}'"
                ))
            })
    }
}
