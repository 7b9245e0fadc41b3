//! Results returned by slot operations.

use serde::{Deserialize, Serialize};

use roster_core::types::{Allocation, RosterId, RosterState, SeatRule, SignupId, SignupStatus};

/// What happens to a signup taken out of its seat by
/// [`SlotService::remove_from_seat`](super::SlotService::remove_from_seat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalMode {
    /// The signup re-enters placement in arrival order during the backfill
    /// pass and may be seated again, possibly in the same seat.
    #[default]
    Requeue,
    /// The signup sits out the backfill pass and is appended to the end of
    /// the waitlist.
    Waitlist,
}

/// Status of the signup an operation was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusedSignup {
    /// The signup.
    pub signup_id: SignupId,
    /// Its status after the operation.
    pub status: SignupStatus,
}

/// Roster state after an operation, for the caller to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOutcome {
    /// Roster id.
    pub roster_id: RosterId,
    /// Rules after the operation (they move with `swap_seats`).
    pub seat_rules: Vec<SeatRule>,
    /// Assignment, waitlist, and per-signup status.
    pub allocation: Allocation,
    /// The highlighted signup, if the operation named one.
    pub focus: Option<FocusedSignup>,
}

impl SlotOutcome {
    /// Build the outcome from a persisted snapshot.
    pub fn from_state(state: &RosterState, focus: Option<SignupId>) -> Self {
        let allocation = state.allocation();
        let focus = focus.map(|signup_id| FocusedSignup {
            signup_id,
            status: allocation.status_of(signup_id),
        });
        Self {
            roster_id: state.id,
            seat_rules: state.seat_rules.clone(),
            allocation,
            focus,
        }
    }
}
