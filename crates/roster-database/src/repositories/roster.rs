//! Roster repository implementation.

use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use roster_core::error::{AppError, ErrorKind};
use roster_core::result::AppResult;
use roster_core::types::{RosterId, RosterState};
use roster_entity::RosterRow;

/// Repository for the `rosters` table.
#[derive(Debug, Clone)]
pub struct RosterRepository {
    pool: PgPool,
}

impl RosterRepository {
    /// Create a new roster repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a roster by id.
    pub async fn find_by_id(&self, id: RosterId) -> AppResult<Option<RosterRow>> {
        sqlx::query_as::<_, RosterRow>("SELECT * FROM rosters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::PersistenceFailure, "Failed to find roster", e))
    }

    /// Insert a new roster with empty seats and waitlist.
    pub async fn insert(&self, state: &RosterState) -> AppResult<RosterRow> {
        let capacity = i32::try_from(state.capacity)
            .map_err(|_| AppError::invalid_argument("Roster capacity is too large"))?;

        sqlx::query_as::<_, RosterRow>(
            "INSERT INTO rosters (capacity, seat_rules, assignment, waitlist) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(capacity)
        .bind(Json(&state.seat_rules))
        .bind(Json(&state.assignment))
        .bind(Json(&state.waitlist))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::PersistenceFailure, "Failed to create roster", e))
    }

    /// Replace seat rules, assignment, and waitlist in one statement.
    ///
    /// Returns `false` if no roster row matched.
    pub async fn update_state(
        &self,
        conn: &mut PgConnection,
        state: &RosterState,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE rosters SET seat_rules = $2, assignment = $3, waitlist = $4, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(state.id)
        .bind(Json(&state.seat_rules))
        .bind(Json(&state.assignment))
        .bind(Json(&state.waitlist))
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::PersistenceFailure, "Failed to persist roster", e))?;

        Ok(result.rows_affected() == 1)
    }

    /// The pool backing this repository.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
