//! Server configuration read from environment variables.
//!
//! - `LIVECODE_BIND`: listen address (default: "0.0.0.0")
//! - `LIVECODE_PORT`: listen port (default: "3333")
//! - `LIVECODE_STATE_DIR`: directory for program files; unset selects the
//!   in-memory backend
//! - `LIVECODE_ASSETS_DIR`: directory of vendored third-party assets
//!   (default: "www")

use std::path::PathBuf;

use crate::error::ApiError;

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3333;
pub const DEFAULT_ASSETS_DIR: &str = "www";

/// Which storage backend the server runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Volatile, process-lifetime storage.
    Memory,
    /// One `<id>.js` file per program under the given directory.
    Directory(PathBuf),
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub backend: Backend,
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            backend: Backend::Memory,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = ServerConfig::default();

        let port = match get("LIVECODE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ApiError::Config(format!("LIVECODE_PORT={raw:?} is not a valid port: {e}"))
            })?,
            None => defaults.port,
        };

        Ok(ServerConfig {
            bind: get("LIVECODE_BIND").unwrap_or(defaults.bind),
            port,
            backend: get("LIVECODE_STATE_DIR")
                .map(|dir| Backend::Directory(PathBuf::from(dir)))
                .unwrap_or(Backend::Memory),
            assets_dir: get("LIVECODE_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
        })
    }

    /// `bind:port` listen address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
