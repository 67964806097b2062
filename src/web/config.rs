//! Web server configuration.

use crate::error::{Result, SmcError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Paths served by fixed routes.
const RESERVED_PATHS: &[&str] = &["/", "/health"];

/// Configuration for the web server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Address to listen on; a bare `:port` listens on every interface
    pub listen_address: String,
    /// Path under which metrics are exposed
    pub telemetry_path: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen_address: crate::DEFAULT_LISTEN_ADDRESS.to_string(),
            telemetry_path: crate::DEFAULT_TELEMETRY_PATH.to_string(),
        }
    }
}

impl WebConfig {
    /// Create a new web configuration with custom address and metrics path.
    pub fn new(listen_address: impl Into<String>, telemetry_path: impl Into<String>) -> Self {
        Self {
            listen_address: listen_address.into(),
            telemetry_path: telemetry_path.into(),
        }
    }

    /// Set the listen address.
    pub fn with_listen_address(mut self, address: impl Into<String>) -> Self {
        self.listen_address = address.into();
        self
    }

    /// Set the metrics path.
    pub fn with_telemetry_path(mut self, path: impl Into<String>) -> Self {
        self.telemetry_path = path.into();
        self
    }

    /// Check the configuration before binding.
    pub fn validate(&self) -> Result<()> {
        if !self.telemetry_path.starts_with('/') {
            return Err(SmcError::config_error(format!(
                "telemetry path '{}' must start with '/'",
                self.telemetry_path
            )));
        }
        if RESERVED_PATHS.contains(&self.telemetry_path.as_str()) {
            return Err(SmcError::config_error(format!(
                "telemetry path '{}' is already served by another route",
                self.telemetry_path
            )));
        }
        // The path is embedded in the landing page and registered as a route
        if let Some(c) = self
            .telemetry_path
            .chars()
            .find(|c| c.is_whitespace() || "\"'<>&:*{}".contains(*c))
        {
            return Err(SmcError::config_error(format!(
                "telemetry path '{}' contains invalid character '{}'",
                self.telemetry_path, c
            )));
        }
        self.bind_address().map(|_| ())
    }

    /// Resolve the socket address to bind.
    pub fn bind_address(&self) -> Result<SocketAddr> {
        let address = if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        };
        address.parse::<SocketAddr>().map_err(|e| {
            SmcError::config_error(format!(
                "invalid listen address '{}': {}",
                self.listen_address, e
            ))
        })
    }
}
