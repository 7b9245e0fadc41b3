//! Allocation results and per-signup status.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::SignupId;
use super::roster::AssignmentEntry;

/// Where a signup currently stands in a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignupStatus {
    /// Seated at `seat_index`.
    Allocated {
        /// Zero-based seat index.
        seat_index: usize,
    },
    /// Waiting at `position` (zero-based) in the waitlist.
    Waitlisted {
        /// Zero-based waitlist position.
        position: usize,
    },
    /// Neither seated nor waitlisted.
    Unallocated,
}

impl SignupStatus {
    /// Waitlist position if waitlisted.
    pub fn waitlist_position(&self) -> Option<usize> {
        match self {
            Self::Waitlisted { position } => Some(*position),
            _ => None,
        }
    }
}

/// A full seat assignment plus waitlist and the derived status map.
///
/// This is the plain result every mutation returns for the caller to
/// serialize into its own wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// One entry per seat.
    pub assignment: Vec<AssignmentEntry>,
    /// Signups waiting for a seat, in order.
    pub waitlist: Vec<SignupId>,
    /// Status of every seated or waitlisted signup.
    pub statuses: BTreeMap<SignupId, SignupStatus>,
}

impl Allocation {
    /// Build an allocation, deriving the status map from seats and waitlist.
    pub fn from_parts(assignment: Vec<AssignmentEntry>, waitlist: Vec<SignupId>) -> Self {
        let mut statuses = BTreeMap::new();
        for (seat_index, entry) in assignment.iter().enumerate() {
            if let Some(id) = entry.signup_id {
                statuses.insert(id, SignupStatus::Allocated { seat_index });
            }
        }
        for (position, id) in waitlist.iter().enumerate() {
            statuses
                .entry(*id)
                .or_insert(SignupStatus::Waitlisted { position });
        }
        Self {
            assignment,
            waitlist,
            statuses,
        }
    }

    /// Status of one signup.
    pub fn status_of(&self, signup_id: SignupId) -> SignupStatus {
        self.statuses
            .get(&signup_id)
            .copied()
            .unwrap_or(SignupStatus::Unallocated)
    }

    /// Number of occupied seats.
    pub fn allocated_count(&self) -> usize {
        self.assignment
            .iter()
            .filter(|e| e.signup_id.is_some())
            .count()
    }
}
