//! Signup row entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use roster_core::types::{ArrivalKey, Signup, SignupAttributes, SignupId};

/// A row of the `signups` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SignupRow {
    /// Signup id.
    pub id: i64,
    /// Owning roster.
    pub roster_id: i64,
    /// Class/role tag.
    pub class_tag: String,
    /// Sponsor flag.
    pub is_sponsor: bool,
    /// Name shown by the API/bot layer.
    pub display_name: Option<String>,
    /// Creation time; with `id` this is the arrival key.
    pub created_at: DateTime<Utc>,
    /// Set when the signup is cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<SignupRow> for Signup {
    fn from(row: SignupRow) -> Self {
        Signup {
            id: SignupId(row.id),
            attributes: SignupAttributes {
                class_tag: row.class_tag,
                sponsor: row.is_sponsor,
            },
            arrival: ArrivalKey {
                created_at: row.created_at,
                sequence: row.id,
            },
            display_name: row.display_name,
        }
    }
}
