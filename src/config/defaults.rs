//! Default value functions for configuration fields.
//!
//! Organized by category for easier maintenance.

use super::logging::LogFormat;

// =============================================================================
// Port & Root Config
// =============================================================================

pub const fn default_port() -> u16 {
    3536
}

// =============================================================================
// Session Defaults
// =============================================================================

pub const fn default_session_cleanup_interval() -> u64 {
    60
}

pub const fn default_session_idle_timeout() -> u64 {
    3600 // 1 hour since last activity
}

pub const fn default_max_sessions() -> usize {
    1000
}

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn default_log_filename() -> String {
    "werwolf.log".to_string()
}

pub fn default_rotation() -> String {
    "daily".to_string()
}

pub const fn default_enable_file_logging() -> bool {
    true
}

pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

// =============================================================================
// CORS Defaults
// =============================================================================

pub fn default_cors_origins() -> String {
    "http://localhost:3000,http://localhost:5173".to_string()
}
