//! In-memory roster gate using a table of Tokio mutexes keyed by roster id.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::trace;

use roster_core::error::AppError;
use roster_core::traits::{RosterGuard, RosterLock};
use roster_core::types::RosterId;

/// Keyed mutex table. A roster's mutex is created on first use and kept
/// for the lifetime of the process.
///
/// Suitable for single-node deployments only.
#[derive(Debug, Clone, Default)]
pub struct MemoryRosterGate {
    /// One mutex per roster id seen so far.
    locks: Arc<DashMap<RosterId, Arc<Mutex<()>>>>,
}

impl MemoryRosterGate {
    /// Creates an empty gate table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of roster ids with a mutex in the table.
    pub fn tracked_rosters(&self) -> usize {
        self.locks.len()
    }
}

#[async_trait]
impl RosterLock for MemoryRosterGate {
    async fn acquire(&self, roster_id: RosterId) -> Result<RosterGuard, AppError> {
        // The map shard lock must not be held across the await below.
        let lock = {
            let entry = self
                .locks
                .entry(roster_id)
                .or_insert_with(|| Arc::new(Mutex::new(())));
            Arc::clone(entry.value())
        };

        let guard = lock.lock_owned().await;
        trace!(roster_id = %roster_id, "Roster gate acquired");
        Ok(RosterGuard::new(roster_id, guard))
    }
}
