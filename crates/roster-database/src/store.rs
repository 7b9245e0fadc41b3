//! PostgreSQL-backed roster store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use roster_core::error::{AppError, ErrorKind};
use roster_core::result::AppResult;
use roster_core::traits::RosterStore;
use roster_core::types::{NewSignup, RosterId, RosterState, SeatRule, Signup, SignupId};

use crate::repositories::{RosterRepository, SignupRepository};

/// [`RosterStore`] over the `rosters` and `signups` tables.
#[derive(Debug, Clone)]
pub struct PgRosterStore {
    rosters: RosterRepository,
    signups: SignupRepository,
}

impl PgRosterStore {
    /// Create a store over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self {
            rosters: RosterRepository::new(pool.clone()),
            signups: SignupRepository::new(pool),
        }
    }
}

#[async_trait]
impl RosterStore for PgRosterStore {
    async fn load_roster(&self, roster_id: RosterId) -> AppResult<Option<RosterState>> {
        self.rosters
            .find_by_id(roster_id)
            .await?
            .map(RosterState::try_from)
            .transpose()
    }

    async fn load_active_signups(&self, roster_id: RosterId) -> AppResult<Vec<Signup>> {
        let rows = self.signups.find_active_by_roster(roster_id).await?;
        Ok(rows.into_iter().map(Signup::from).collect())
    }

    async fn persist_roster(&self, state: &RosterState) -> AppResult<()> {
        let mut tx = self.rosters.pool().begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceFailure, "Failed to begin transaction", e)
        })?;

        if !self.rosters.update_state(&mut tx, state).await? {
            return Err(AppError::not_found(format!("Roster {} not found", state.id)));
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceFailure, "Failed to commit roster", e)
        })?;

        debug!(roster_id = %state.id, "Roster persisted");
        Ok(())
    }

    async fn create_roster(
        &self,
        capacity: usize,
        seat_rules: Vec<SeatRule>,
    ) -> AppResult<RosterState> {
        let draft = RosterState::open(RosterId(0), capacity, seat_rules);
        let row = self.rosters.insert(&draft).await?;
        RosterState::try_from(row)
    }

    async fn create_signup(&self, roster_id: RosterId, signup: &NewSignup) -> AppResult<Signup> {
        if self.rosters.find_by_id(roster_id).await?.is_none() {
            return Err(AppError::not_found(format!("Roster {roster_id} not found")));
        }
        let row = self.signups.insert(roster_id, signup).await?;
        Ok(Signup::from(row))
    }

    async fn cancel_signup(&self, roster_id: RosterId, signup_id: SignupId) -> AppResult<()> {
        match self.signups.cancel(roster_id, signup_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!(
                "Signup {signup_id} not found in roster {roster_id}"
            ))),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.rosters.pool())
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::PersistenceFailure, "Health check failed", e))
    }
}
