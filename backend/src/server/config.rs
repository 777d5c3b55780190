//! HTTP server configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Configuration values controlling the HTTP listener.
///
/// Values come from `ROSTER_*` environment variables with CLI overrides;
/// absent fields fall back to the defaults exposed by the accessors.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct ServerSettings {
    /// Interface to bind, e.g. `127.0.0.1`.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
}

impl ServerSettings {
    /// Return the configured host, falling back to the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}
