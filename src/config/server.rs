//! Server behavior configuration types.

use super::defaults::{
    default_max_sessions, default_session_cleanup_interval, default_session_idle_timeout,
};
use serde::{Deserialize, Serialize};

/// Session lifecycle configuration: how often the idle reaper runs and how
/// long a session may sit without activity before it is dropped
/// (`crate::server::maintenance::cleanup_task`).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Interval between idle-session sweeps (seconds)
    #[serde(default = "default_session_cleanup_interval")]
    pub session_cleanup_interval: u64,
    /// Time after last activity when a session is reaped (seconds)
    #[serde(default = "default_session_idle_timeout")]
    pub session_idle_timeout: u64,
    /// Soft cap on concurrently live sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            session_cleanup_interval: default_session_cleanup_interval(),
            session_idle_timeout: default_session_idle_timeout(),
            max_sessions: default_max_sessions(),
        }
    }
}
