//! Root configuration types.

use super::defaults::{default_cors_origins, default_port};
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use serde::{Deserialize, Serialize};

/// Root configuration struct.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Comma-separated list of allowed CORS origins. Kept permissive by
    /// default since the HTTP surface has no cookie-based session auth.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            cors_origins: default_cors_origins(),
        }
    }
}
