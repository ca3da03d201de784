//! Logging configuration for the session engine: where command/session log
//! lines go (stdout, and optionally a rolling file), at what level, and in
//! what shape (JSON for ingestion, text for a terminal).

use super::defaults::{
    default_enable_file_logging, default_log_dir, default_log_filename, default_log_format,
    default_rotation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logging configuration.
#[derive(Debug, Serialize, Clone)]
pub struct LoggingConfig {
    /// Directory path for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Log file base name
    #[serde(default = "default_log_filename")]
    pub filename: String,
    /// Rotation policy: "daily" (default), "hourly", or "never"
    #[serde(default = "default_rotation")]
    pub rotation: String,
    /// Optional tracing level; read from JSON as a string and converted to enum
    #[serde(default)]
    pub level: Option<LogLevel>,
    /// Enable rolling file logging in addition to stdout JSON logs
    #[serde(default = "default_enable_file_logging")]
    pub enable_file_logging: bool,
    /// Format for rendered logs
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

// Custom Deserialize so a misconfigured `level` field (wrong type, unknown
// string, stray array) degrades to the default level instead of failing
// config load outright — a session engine should still start and log at
// "info" rather than refuse to boot over a typo in `logging.level`.
impl<'de> Deserialize<'de> for LoggingConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct LoggingConfigHelper {
            #[serde(default = "default_log_dir")]
            dir: String,
            #[serde(default = "default_log_filename")]
            filename: String,
            #[serde(default = "default_rotation")]
            rotation: String,
            #[serde(default)]
            level: Option<serde_json::Value>,
            #[serde(default = "default_enable_file_logging")]
            enable_file_logging: bool,
            #[serde(default = "default_log_format")]
            format: LogFormat,
        }

        let helper = LoggingConfigHelper::deserialize(deserializer)?;
        let level = helper.level.and_then(|value| parse_level_value(&value));

        Ok(Self {
            dir: helper.dir,
            filename: helper.filename,
            rotation: helper.rotation,
            level,
            enable_file_logging: helper.enable_file_logging,
            format: helper.format,
        })
    }
}

/// Accepts either a bare string (`"debug"`) or a one-element array
/// (`["debug"]`, as some config generators emit for single-valued fields);
/// anything else, or an unrecognized level name, yields `None` so the
/// caller falls back to the default level rather than erroring.
fn parse_level_value(value: &serde_json::Value) -> Option<LogLevel> {
    if let Some(s) = value.as_str() {
        return parse_level_str(s);
    }
    if let Some(first) = value.as_array().and_then(|arr| arr.first()) {
        return first.as_str().and_then(parse_level_str);
    }
    None
}

fn parse_level_str(s: &str) -> Option<LogLevel> {
    match s.trim().to_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warn),
        "error" | "err" => Some(LogLevel::Error),
        other => {
            eprintln!("invalid log level '{other}', using default");
            None
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            filename: default_log_filename(),
            rotation: default_rotation(),
            level: None,
            enable_file_logging: default_enable_file_logging(),
            format: default_log_format(),
        }
    }
}

/// Log level enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_level_str(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid log level '{}', expected one of: trace, debug, info, warn, error",
                s.trim()
            ))
        })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log format enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_plain_string() {
        let cfg: LoggingConfig = serde_json::from_str(r#"{"level": "debug"}"#).unwrap();
        assert_eq!(cfg.level, Some(LogLevel::Debug));
    }

    #[test]
    fn level_from_single_element_array() {
        let cfg: LoggingConfig = serde_json::from_str(r#"{"level": ["warn"]}"#).unwrap();
        assert_eq!(cfg.level, Some(LogLevel::Warn));
    }

    #[test]
    fn unrecognized_level_falls_back_to_none() {
        let cfg: LoggingConfig = serde_json::from_str(r#"{"level": "shout"}"#).unwrap();
        assert_eq!(cfg.level, None);
    }

    #[test]
    fn defaults_point_at_a_werwolf_log_file() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.filename, "werwolf.log");
        assert!(cfg.enable_file_logging);
    }
}
