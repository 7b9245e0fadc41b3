//! Roster row entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use roster_core::error::AppError;
use roster_core::types::{AssignmentEntry, RosterId, RosterState, SeatRule, SignupId};

/// A row of the `rosters` table.
///
/// Seat rules, assignment, and waitlist are stored as JSONB documents in
/// the persisted shape (`{allowSponsor, allowedClasses}`,
/// `{signupId, locked}`, and a plain id array).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RosterRow {
    /// Roster id.
    pub id: i64,
    /// Number of seats.
    pub capacity: i32,
    /// Per-seat rules.
    pub seat_rules: Json<Vec<SeatRule>>,
    /// Per-seat occupants.
    pub assignment: Json<Vec<AssignmentEntry>>,
    /// Ordered waitlist.
    pub waitlist: Json<Vec<SignupId>>,
    /// When the roster was opened.
    pub created_at: DateTime<Utc>,
    /// Last persisted mutation.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RosterRow> for RosterState {
    type Error = AppError;

    fn try_from(row: RosterRow) -> Result<Self, Self::Error> {
        let capacity = usize::try_from(row.capacity).map_err(|_| {
            AppError::persistence(format!(
                "Roster {} has invalid capacity {}",
                row.id, row.capacity
            ))
        })?;

        Ok(RosterState {
            id: RosterId(row.id),
            capacity,
            seat_rules: row.seat_rules.0,
            assignment: row.assignment.0,
            waitlist: row.waitlist.0,
        }
        .normalized())
    }
}
