//! Signup repository implementation.

use sqlx::PgPool;

use roster_core::error::{AppError, ErrorKind};
use roster_core::result::AppResult;
use roster_core::types::{NewSignup, RosterId, SignupId};
use roster_entity::SignupRow;

/// Repository for the `signups` table.
#[derive(Debug, Clone)]
pub struct SignupRepository {
    pool: PgPool,
}

impl SignupRepository {
    /// Create a new signup repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Non-cancelled signups of a roster in arrival order.
    pub async fn find_active_by_roster(&self, roster_id: RosterId) -> AppResult<Vec<SignupRow>> {
        sqlx::query_as::<_, SignupRow>(
            "SELECT * FROM signups WHERE roster_id = $1 AND cancelled_at IS NULL \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(roster_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceFailure, "Failed to load active signups", e)
        })
    }

    /// Record a signup; the database assigns id and creation time.
    pub async fn insert(&self, roster_id: RosterId, signup: &NewSignup) -> AppResult<SignupRow> {
        sqlx::query_as::<_, SignupRow>(
            "INSERT INTO signups (roster_id, class_tag, is_sponsor, display_name) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(roster_id)
        .bind(&signup.attributes.class_tag)
        .bind(signup.attributes.sponsor)
        .bind(signup.display_name.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::PersistenceFailure, "Failed to create signup", e))
    }

    /// Mark a signup cancelled, keeping the first cancellation time.
    ///
    /// Returns `None` if the signup does not belong to the roster.
    pub async fn cancel(
        &self,
        roster_id: RosterId,
        signup_id: SignupId,
    ) -> AppResult<Option<SignupRow>> {
        sqlx::query_as::<_, SignupRow>(
            "UPDATE signups SET cancelled_at = COALESCE(cancelled_at, NOW()) \
             WHERE id = $1 AND roster_id = $2 RETURNING *",
        )
        .bind(signup_id)
        .bind(roster_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::PersistenceFailure, "Failed to cancel signup", e))
    }
}
