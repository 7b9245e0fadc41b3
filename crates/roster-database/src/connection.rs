//! PostgreSQL pools for the roster store and the advisory roster gate.
//!
//! The store and the gate draw from separate pools: a gate holder keeps one
//! gate connection for the whole mutation while the store works on its own.

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use roster_core::config::{DatabaseConfig, GateBackend};
use roster_core::error::{AppError, ErrorKind};

use crate::store::PgRosterStore;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connected, migrated pools for a PostgreSQL deployment.
#[derive(Debug, Clone)]
pub struct RosterPools {
    store: PgPool,
    gate: Option<PgPool>,
}

impl RosterPools {
    /// Connect the store pool, bring the schema up to date, and open a gate
    /// pool when `gate` is the advisory backend.
    pub async fn connect(config: &DatabaseConfig, gate: GateBackend) -> Result<Self, AppError> {
        let options = connect_options(&config.url)?;
        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            user = options.get_username(),
            max_connections = config.max_connections,
            "Connecting roster store"
        );

        let store = pool_options(config, config.max_connections, config.min_connections)
            .connect_with(options.clone().application_name("roster-store"))
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::PersistenceFailure,
                    "Failed to connect roster store",
                    e,
                )
            })?;

        MIGRATOR.run(&store).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to migrate roster schema",
                e,
            )
        })?;
        info!("Roster schema up to date");

        let gate = match gate {
            GateBackend::Memory => None,
            GateBackend::Advisory => {
                info!(
                    max_connections = config.gate_max_connections,
                    "Opening advisory gate pool"
                );
                // Connections open on first acquire.
                let pool = pool_options(config, config.gate_max_connections, 0)
                    .connect_lazy_with(options.application_name("roster-gate"));
                Some(pool)
            }
        };

        Ok(Self { store, gate })
    }

    /// A roster store over the store pool.
    pub fn store(&self) -> PgRosterStore {
        PgRosterStore::new(self.store.clone())
    }

    /// The pool reserved for the advisory gate, if one was opened.
    pub fn gate_pool(&self) -> Option<PgPool> {
        self.gate.clone()
    }

    /// Close both pools.
    pub async fn close(&self) {
        self.store.close().await;
        if let Some(gate) = &self.gate {
            gate.close().await;
        }
        info!("Roster pools closed");
    }
}

/// Parse the connection URL. A malformed URL is a configuration error.
fn connect_options(url: &str) -> Result<PgConnectOptions, AppError> {
    PgConnectOptions::from_str(url).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            "database.url is not a valid PostgreSQL URL",
            e,
        )
    })
}

fn pool_options(config: &DatabaseConfig, max: u32, min: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max)
        .min_connections(min)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}
