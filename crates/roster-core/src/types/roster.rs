//! Roster state snapshot.
//!
//! The store collaborator owns the persisted roster; the core loads it as
//! a [`RosterState`] value, derives a new value, and hands it back for a
//! single write.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::allocation::{Allocation, SignupStatus};
use super::id::{RosterId, SignupId};
use super::rule::{SeatRule, normalize_rules};
use crate::error::AppError;

/// One seat of the assignment array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentEntry {
    /// Occupant, if any.
    #[serde(default)]
    pub signup_id: Option<SignupId>,
    /// Exempt from automatic reallocation.
    #[serde(default)]
    pub locked: bool,
}

impl AssignmentEntry {
    /// An empty, unlocked seat.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A seat held by `signup_id`.
    pub fn occupied(signup_id: SignupId, locked: bool) -> Self {
        Self {
            signup_id: Some(signup_id),
            locked,
        }
    }

    /// Whether the seat has no occupant.
    pub fn is_empty(&self) -> bool {
        self.signup_id.is_none()
    }
}

/// Value snapshot of one roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterState {
    /// Roster id.
    pub id: RosterId,
    /// Number of seats.
    pub capacity: usize,
    /// One rule per seat.
    pub seat_rules: Vec<SeatRule>,
    /// One entry per seat.
    pub assignment: Vec<AssignmentEntry>,
    /// Ordered overflow list.
    pub waitlist: Vec<SignupId>,
}

impl RosterState {
    /// A freshly opened roster: empty seats, empty waitlist.
    pub fn open(id: RosterId, capacity: usize, seat_rules: Vec<SeatRule>) -> Self {
        Self {
            id,
            capacity,
            seat_rules: normalize_rules(seat_rules, capacity),
            assignment: vec![AssignmentEntry::empty(); capacity],
            waitlist: Vec::new(),
        }
    }

    /// Repair a loaded snapshot so that both arrays have exactly `capacity`
    /// entries and no signup id appears twice.
    ///
    /// A signup seated more than once keeps its lowest-index seat; waitlist
    /// entries for seated or repeated signups are dropped.
    pub fn normalized(mut self) -> Self {
        self.seat_rules = normalize_rules(std::mem::take(&mut self.seat_rules), self.capacity);
        self.assignment
            .resize_with(self.capacity, AssignmentEntry::empty);

        let mut seen = HashSet::new();
        for entry in &mut self.assignment {
            if let Some(id) = entry.signup_id {
                if !seen.insert(id) {
                    *entry = AssignmentEntry::empty();
                }
            }
        }
        self.waitlist.retain(|id| seen.insert(*id));
        self
    }

    /// Fail with `InvalidArgument` unless `seat_index` is within `[0, capacity)`.
    pub fn check_seat(&self, seat_index: usize) -> Result<(), AppError> {
        if seat_index >= self.capacity {
            return Err(AppError::invalid_argument(format!(
                "Seat index {seat_index} is outside 0..{} for roster {}",
                self.capacity, self.id
            )));
        }
        Ok(())
    }

    /// Seat currently held by `signup_id`.
    pub fn seat_of(&self, signup_id: SignupId) -> Option<usize> {
        self.assignment
            .iter()
            .position(|e| e.signup_id == Some(signup_id))
    }

    /// Status of `signup_id` by scanning seats, then the waitlist.
    pub fn status_of(&self, signup_id: SignupId) -> SignupStatus {
        if let Some(seat_index) = self.seat_of(signup_id) {
            return SignupStatus::Allocated { seat_index };
        }
        match self.waitlist.iter().position(|id| *id == signup_id) {
            Some(position) => SignupStatus::Waitlisted { position },
            None => SignupStatus::Unallocated,
        }
    }

    /// The assignment and waitlist as a plain [`Allocation`].
    pub fn allocation(&self) -> Allocation {
        Allocation::from_parts(self.assignment.clone(), self.waitlist.clone())
    }
}
