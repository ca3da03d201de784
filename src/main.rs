#![cfg_attr(not(test), deny(clippy::panic))]

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use werwolf_server::config;
use werwolf_server::http;
use werwolf_server::logging;
use werwolf_server::server::GameServer;

/// Werwolf Server -- authoritative session engine for a host-moderated
/// Werewolf/Mafia social deduction game.
#[derive(Parser, Debug)]
#[command(name = "werwolf-server")]
#[command(about = "Authoritative session engine for a host-moderated Werewolf/Mafia game")]
#[command(version)]
struct Cli {
    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines and pre-deployment checks.
    #[arg(long, short = 'c', conflicts_with = "print_config")]
    validate_config: bool,

    /// Print the loaded configuration to stdout (as JSON) and exit.
    /// Useful for debugging configuration loading from multiple sources.
    #[arg(long, conflicts_with = "validate_config")]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from config.json if present; otherwise use code defaults.
    let cfg = config::load();

    // Handle --print-config: output the loaded configuration as JSON
    if cli.print_config {
        let json = serde_json::to_string_pretty(&cfg)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    // Validate configuration. Note: config::load() already calls
    // validate_config_security() but only logs errors to stderr and
    // continues. Here we capture the result to provide a proper exit code
    // for --validate-config and to fail startup on a bad config otherwise.
    let validation_result = config::validate_config_security(&cfg);

    if cli.validate_config {
        match validation_result {
            Ok(()) => {
                println!("Configuration validation passed");
                println!();
                println!("Configuration summary:");
                println!("  Port: {}", cfg.port);
                println!("  Storage backend: InMemory");
                println!(
                    "  Session idle timeout: {}s",
                    cfg.server.session_idle_timeout
                );
                println!(
                    "  Session cleanup interval: {}s",
                    cfg.server.session_cleanup_interval
                );
                println!("  Max sessions: {}", cfg.server.max_sessions);
                println!("  CORS origins: {}", cfg.cors_origins);
                return Ok(());
            }
            Err(e) => {
                eprintln!("Configuration validation failed:\n{e}");
                std::process::exit(1);
            }
        }
    }

    validation_result?;

    logging::init_with_config(&cfg.logging);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!(%addr, "starting werwolf server");

    let game_server = GameServer::new();

    let cleanup_server = game_server.clone();
    let cleanup_interval = Duration::from_secs(cfg.server.session_cleanup_interval);
    let idle_timeout = chrono::Duration::seconds(cfg.server.session_idle_timeout as i64);
    tokio::spawn(async move {
        cleanup_server.cleanup_task(cleanup_interval, idle_timeout).await;
    });

    let cors = http::routes::cors_layer(&cfg.cors_origins);
    let router = http::create_router(game_server, cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, cors_origins = %cfg.cors_origins, "server listening");

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn test_cli_default_no_flags() {
        let cli = Cli::try_parse_from(["werwolf-server"]).unwrap();
        assert!(!cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_validate_config_long() {
        let cli = Cli::try_parse_from(["werwolf-server", "--validate-config"]).unwrap();
        assert!(cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_validate_config_short() {
        let cli = Cli::try_parse_from(["werwolf-server", "-c"]).unwrap();
        assert!(cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_print_config() {
        let cli = Cli::try_parse_from(["werwolf-server", "--print-config"]).unwrap();
        assert!(!cli.validate_config);
        assert!(cli.print_config);
    }

    #[test]
    fn test_cli_validate_and_print_config_conflict() {
        let result = Cli::try_parse_from(["werwolf-server", "--validate-config", "--print-config"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("cannot be used with"));
    }

    #[test]
    fn test_cli_help_contains_flags() {
        let result = Cli::try_parse_from(["werwolf-server", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        let help_text = err.to_string();
        assert!(help_text.contains("--validate-config"));
        assert!(help_text.contains("--print-config"));
        assert!(help_text.contains("-c"));
    }

    #[test]
    fn test_cli_version() {
        let result = Cli::try_parse_from(["werwolf-server", "--version"]);
        assert!(result.is_err());
    }
}
