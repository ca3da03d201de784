//! Configuration validation functions.

use super::Config;

/// Validates a loaded `Config`, catching combinations that would make the
/// server misbehave silently (e.g. a cleanup interval longer than the idle
/// timeout it's meant to enforce).
pub fn validate_config_security(config: &Config) -> anyhow::Result<()> {
    if config.server.session_idle_timeout == 0 {
        anyhow::bail!("server.session_idle_timeout must be greater than zero");
    }
    if config.server.session_cleanup_interval == 0 {
        anyhow::bail!("server.session_cleanup_interval must be greater than zero");
    }
    if config.server.session_cleanup_interval > config.server.session_idle_timeout {
        eprintln!(
            "\nWARNING: server.session_cleanup_interval ({}) exceeds session_idle_timeout ({}).\n\
             Idle sessions may live noticeably longer than the configured timeout.\n",
            config.server.session_cleanup_interval, config.server.session_idle_timeout
        );
    }
    if config.server.max_sessions == 0 {
        anyhow::bail!("server.max_sessions must be greater than zero");
    }

    if config.cors_origins.trim() != "*" {
        for origin in config.cors_origins.split(',').map(str::trim) {
            if origin.is_empty() {
                continue;
            }
            if origin.parse::<axum::http::HeaderValue>().is_err() {
                anyhow::bail!("cors_origins entry '{origin}' is not a valid header value");
            }
        }
    }

    Ok(())
}

/// Detects if we're running in production mode, via `WERWOLF__ENVIRONMENT`
/// or the generic `PRODUCTION` / `PROD` environment variables.
pub fn is_production_mode() -> bool {
    use std::env;

    if let Ok(mode) = env::var("WERWOLF__ENVIRONMENT") {
        return mode.to_lowercase() == "production" || mode.to_lowercase() == "prod";
    }

    env::var("WERWOLF_PRODUCTION").is_ok() || env::var("PRODUCTION").is_ok() || env::var("PROD").is_ok()
}
