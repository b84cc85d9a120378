//! HTTP server settings read from the environment.

use std::path::PathBuf;

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP port (env: `PORT`, default 3000).
    pub http_port: u16,
    /// Policy directory (env: `TIMESHEET_CONFIG_DIR`, default `./config/br-clt`).
    pub config_dir: PathBuf,
}

impl ServerConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default policy directory.
    pub const DEFAULT_CONFIG_DIR: &'static str = "./config/br-clt";

    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through a lookup function.
    ///
    /// An unparsable `PORT` falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_port = lookup("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::DEFAULT_PORT);
        let config_dir = lookup("TIMESHEET_CONFIG_DIR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_CONFIG_DIR.to_string())
            .into();

        Self {
            http_port,
            config_dir,
        }
    }
}
