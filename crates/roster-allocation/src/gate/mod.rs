//! Per-roster concurrency gates.
//!
//! Provides mutual exclusion keyed by roster id using either:
//! - an in-memory keyed mutex table (single-node deployments)
//! - PostgreSQL advisory locks (several nodes sharing one database)

#[cfg(feature = "advisory-gate")]
pub mod advisory;
pub mod memory;

use async_trait::async_trait;

use roster_core::config::{AllocationConfig, GateBackend};
use roster_core::error::AppError;
use roster_core::traits::{RosterGuard, RosterLock};
use roster_core::types::RosterId;

#[cfg(feature = "advisory-gate")]
pub use advisory::AdvisoryRosterGate;
pub use memory::MemoryRosterGate;

/// Dispatcher for gate strategies, selected from configuration.
#[derive(Debug, Clone)]
pub enum RosterGate {
    /// In-memory keyed mutex table.
    Memory(MemoryRosterGate),
    /// PostgreSQL advisory lock.
    #[cfg(feature = "advisory-gate")]
    Advisory(AdvisoryRosterGate),
}

impl RosterGate {
    /// Builds the configured gate. The advisory gate needs a pool.
    #[cfg(feature = "advisory-gate")]
    pub fn from_config(
        config: &AllocationConfig,
        pool: Option<sqlx::PgPool>,
    ) -> Result<Self, AppError> {
        match (config.gate, pool) {
            (GateBackend::Memory, _) => Ok(Self::Memory(MemoryRosterGate::new())),
            (GateBackend::Advisory, Some(pool)) => {
                Ok(Self::Advisory(AdvisoryRosterGate::new(pool)))
            }
            (GateBackend::Advisory, None) => Err(AppError::configuration(
                "Advisory gate requires a PostgreSQL pool",
            )),
        }
    }

    /// Builds the configured gate. Only the in-memory gate is compiled in.
    #[cfg(not(feature = "advisory-gate"))]
    pub fn from_config(config: &AllocationConfig) -> Result<Self, AppError> {
        match config.gate {
            GateBackend::Memory => Ok(Self::Memory(MemoryRosterGate::new())),
            GateBackend::Advisory => Err(AppError::configuration(
                "Advisory gate support is not compiled in",
            )),
        }
    }
}

#[async_trait]
impl RosterLock for RosterGate {
    async fn acquire(&self, roster_id: RosterId) -> Result<RosterGuard, AppError> {
        match self {
            Self::Memory(inner) => inner.acquire(roster_id).await,
            #[cfg(feature = "advisory-gate")]
            Self::Advisory(inner) => inner.acquire(roster_id).await,
        }
    }
}
