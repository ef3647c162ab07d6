//! Server configuration from the environment.
//!
//! | Variable          | Default   | Meaning              |
//! |-------------------|-----------|----------------------|
//! | `PORT`            | `8080`    | listening port       |
//! | `DFS_TRACE_BIND`  | `0.0.0.0` | bind address         |
//!
//! An unparsable `PORT` falls back to the default with a warning rather than
//! aborting startup.

use std::net::{IpAddr, SocketAddr};
use tracing::warn;

/// Environment variable selecting the listening port.
pub const PORT_ENV: &str = "PORT";
/// Environment variable overriding the bind address.
pub const BIND_ENV: &str = "DFS_TRACE_BIND";
/// Port used when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8080;
/// Address used when `DFS_TRACE_BIND` is unset.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),
}

/// Listener settings for the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_address: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `PORT` and `DFS_TRACE_BIND` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(PORT_ENV) {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(e) => warn!(
                    value = %raw,
                    error = %e,
                    default = DEFAULT_PORT,
                    "ignoring invalid PORT"
                ),
            }
        }
        if let Some(bind) = lookup(BIND_ENV) {
            let bind = bind.trim();
            if !bind.is_empty() {
                config.bind_address = bind.to_string();
            }
        }
        config
    }

    /// Resolves the socket address to listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind_address.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
