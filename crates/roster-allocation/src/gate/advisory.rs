//! PostgreSQL advisory-lock roster gate for multi-node deployments.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::pool::PoolConnection;
use sqlx::postgres::Postgres;
use tracing::{trace, warn};

use roster_core::error::{AppError, ErrorKind};
use roster_core::traits::{RosterGuard, RosterLock};
use roster_core::types::RosterId;

/// First pause after a contended attempt.
const INITIAL_BACKOFF: Duration = Duration::from_millis(5);
/// Upper bound for the pause between attempts.
const MAX_BACKOFF: Duration = Duration::from_millis(200);

/// Holds a session-level advisory lock keyed by the roster id.
///
/// Waiters poll with `pg_try_advisory_lock` and hand their connection back
/// between attempts, so only lock holders keep a connection checked out.
/// The pool should be separate from the store's pool: a holder must never
/// wait on the same pool its own waiters draw from.
#[derive(Debug, Clone)]
pub struct AdvisoryRosterGate {
    pool: PgPool,
}

impl AdvisoryRosterGate {
    /// Creates a gate backed by `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Connection holding the advisory lock. Dropping it releases the lock and
/// returns the connection to the pool.
struct AdvisoryHold {
    roster_id: RosterId,
    conn: Option<PoolConnection<Postgres>>,
}

impl Drop for AdvisoryHold {
    fn drop(&mut self) {
        let Some(mut conn) = self.conn.take() else {
            return;
        };
        let roster_id = self.roster_id;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let unlocked = sqlx::query("SELECT pg_advisory_unlock($1)")
                        .bind(roster_id.get())
                        .execute(&mut *conn)
                        .await;
                    match unlocked {
                        Ok(_) => trace!(roster_id = %roster_id, "Advisory roster gate released"),
                        Err(e) => {
                            warn!(roster_id = %roster_id, error = %e, "Advisory unlock failed; closing session");
                            conn.close_on_drop();
                        }
                    }
                });
            }
            // No runtime to run the unlock on: ending the session releases it.
            Err(_) => conn.close_on_drop(),
        }
    }
}

/// One non-blocking attempt. `None` means another session holds the lock.
async fn try_lock(pool: PgPool, roster_id: RosterId) -> Result<Option<AdvisoryHold>, AppError> {
    let mut conn = pool.acquire().await.map_err(|e| {
        AppError::with_source(
            ErrorKind::PersistenceFailure,
            "Failed to acquire connection for roster gate",
            e,
        )
    })?;

    let locked: bool = sqlx::query_scalar("SELECT pg_try_advisory_lock($1)")
        .bind(roster_id.get())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceFailure,
                format!("Failed to take advisory lock for roster {roster_id}"),
                e,
            )
        })?;

    Ok(locked.then(|| AdvisoryHold {
        roster_id,
        conn: Some(conn),
    }))
}

#[async_trait]
impl RosterLock for AdvisoryRosterGate {
    async fn acquire(&self, roster_id: RosterId) -> Result<RosterGuard, AppError> {
        let mut backoff = INITIAL_BACKOFF;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            // The attempt runs as its own task: if this future is dropped
            // mid-query, the task still finishes and a won lock is released
            // when its unclaimed output drops.
            let attempt = tokio::spawn(try_lock(self.pool.clone(), roster_id))
                .await
                .map_err(|e| AppError::internal(format!("Roster gate attempt aborted: {e}")))?;

            if let Some(hold) = attempt? {
                trace!(roster_id = %roster_id, attempts, "Advisory roster gate acquired");
                return Ok(RosterGuard::new(roster_id, hold));
            }

            tokio::time::sleep(backoff).await;
            backoff = (backoff * 2).min(MAX_BACKOFF);
        }
    }
}
