#![cfg_attr(not(test), deny(clippy::panic))]

use chess_coordinator::config;
use chess_coordinator::directory::create_store;
use chess_coordinator::logging;
use chess_coordinator::server::GameCoordinator;
use chess_coordinator::validation::AcceptAllValidator;
use chess_coordinator::websocket::{self, AppState};
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};

/// Chess coordinator -- pairs two players into a game over WebSocket and relays their moves
#[derive(Parser, Debug)]
#[command(name = "chess-coordinator")]
#[command(about = "WebSocket session coordinator for two-player chess games")]
#[command(version)]
struct Cli {
    /// Validate configuration and exit without starting the server.
    #[arg(long, short = 'c', conflicts_with = "print_config")]
    validate_config: bool,

    /// Print the loaded configuration to stdout (as JSON) and exit.
    #[arg(long, conflicts_with = "validate_config")]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load();

    if cli.print_config {
        let json = serde_json::to_string_pretty(&cfg)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let validation_result = config::validate_config(&cfg);

    if cli.validate_config {
        match validation_result {
            Ok(()) => {
                println!("Configuration validation passed");
                println!();
                println!("Configuration summary:");
                println!("  Port: {}", cfg.port);
                println!("  Storage backend: {}", cfg.storage.backend);
                println!("  Storage path: {}", cfg.storage.path);
                println!("  Seed test game: {}", cfg.server.seed_test_game);
                println!(
                    "  Re-entry token required: {}",
                    cfg.server.require_reentry_token
                );
                println!("  Admin events enabled: {}", cfg.server.enable_admin_events);
                return Ok(());
            }
            Err(e) => {
                eprintln!("Configuration validation failed:\n{e}");
                std::process::exit(1);
            }
        }
    }

    validation_result?;

    // Held for the lifetime of the process so buffered file logs are flushed.
    let _log_guard = logging::init_with_config(&cfg.logging);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!(
        %addr,
        storage = %cfg.storage.backend,
        path = %cfg.storage.path,
        "Starting chess coordinator"
    );

    let store = create_store(&cfg.storage);
    let coordinator =
        GameCoordinator::from_store(cfg.server.clone(), store, Arc::new(AcceptAllValidator)).await;

    if cfg.server.seed_test_game {
        coordinator.seed_test_game_if_empty().await;
    }

    let state = AppState::new(coordinator, cfg.security.max_message_size);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    websocket::run_server(listener, state, &cfg.security, shutdown_signal()).await?;

    tracing::info!("Chess coordinator stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod cli_tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn test_cli_default_no_flags() {
        let cli = Cli::try_parse_from(["chess-coordinator"]).unwrap();
        assert!(!cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_validate_config_short() {
        let cli = Cli::try_parse_from(["chess-coordinator", "-c"]).unwrap();
        assert!(cli.validate_config);
    }

    #[test]
    fn test_cli_print_config() {
        let cli = Cli::try_parse_from(["chess-coordinator", "--print-config"]).unwrap();
        assert!(cli.print_config);
    }

    #[test]
    fn test_cli_validate_and_print_config_conflict() {
        let result =
            Cli::try_parse_from(["chess-coordinator", "--validate-config", "--print-config"]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("cannot be used with"));
    }
}
