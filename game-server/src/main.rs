use std::net::IpAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};

use game_core::Dictionary;
use game_persistence::connection::connect_and_migrate;
use game_server::{
    config::Config, create_routes, game_manager::GameManager, player_manager::PlayerManager,
    store::Store,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!("Server failed to start: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting word board server...");

    let config = Config::from_env().context("Failed to read configuration")?;

    let dictionary = match &config.words_file {
        Some(path) => {
            info!("Loading words from {}", path.display());
            Dictionary::from_file(path)
                .with_context(|| format!("Failed to load words from '{}'", path.display()))?
        }
        None => Dictionary::embedded(),
    };
    if dictionary.is_empty() {
        warn!("Dictionary is empty, every word will be rejected");
    }
    info!("Loaded {} words", dictionary.len());

    // Initialize database connection and run migrations
    let db = connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database '{}'", config.database_url))?;
    let store = Store::new(db, config.store_timeout);

    let game_manager = Arc::new(GameManager::new(
        Arc::new(dictionary),
        store.clone(),
        &config,
    ));
    let player_manager = Arc::new(PlayerManager::new(store));

    let routes = create_routes(game_manager, player_manager);

    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST '{}'", config.host))?;

    let (addr, server) =
        warp::serve(routes).try_bind_with_graceful_shutdown((host, config.port), shutdown_signal())?;

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                let _ = signal::ctrl_c().await;
                info!("Received SIGINT, shutting down gracefully...");
                return;
            }
        };

        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
