//! Roster Server: seat allocation for event rosters
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use roster_allocation::RosterGate;
use roster_api::{AppState, build_router};
use roster_core::config::{AppConfig, StoreBackend};
use roster_core::error::AppError;
use roster_core::traits::{RosterLock, RosterStore};
use roster_database::{MemoryRosterStore, RosterPools};
use roster_service::SlotService;

#[tokio::main]
async fn main() {
    let env = std::env::var("ROSTER_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting roster server v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Store (and pools for the advisory gate) ──────────
    let (store, pools): (Arc<dyn RosterStore>, Option<RosterPools>) =
        match config.database.backend {
            StoreBackend::Postgres => {
                let pools = RosterPools::connect(&config.database, config.allocation.gate).await?;
                let store: Arc<dyn RosterStore> = Arc::new(pools.store());
                (store, Some(pools))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory roster store; state is lost on restart");
                let store: Arc<dyn RosterStore> = Arc::new(MemoryRosterStore::new());
                (store, None)
            }
        };

    // ── Step 2: Roster gate ──────────────────────────────────────
    let gate = RosterGate::from_config(
        &config.allocation,
        pools.as_ref().and_then(RosterPools::gate_pool),
    )?;
    tracing::info!(gate = ?config.allocation.gate, "Roster gate initialized");
    let gate: Arc<dyn RosterLock> = Arc::new(gate);

    // ── Step 3: Services ─────────────────────────────────────────
    let slot_service = Arc::new(SlotService::new(
        Arc::clone(&store),
        gate,
        config.allocation.clone(),
    ));

    // ── Step 4: HTTP server ──────────────────────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState {
        config: Arc::new(config),
        store,
        slot_service,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(
            roster_core::error::ErrorKind::Internal,
            format!("Failed to bind {addr}"),
            e,
        )
    })?;
    tracing::info!(address = %addr, "Roster server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed");
        }
    }

    if let Some(pools) = pools {
        pools.close().await;
    }
    tracing::info!("Roster server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
