//! Seat mutation operations.
//!
//! Every mutating call follows the same shape: take the roster gate, load
//! the snapshot, derive the new state in memory, persist it with one write,
//! release the gate. If the write fails the previously persisted state stays
//! in force and the error is returned unchanged.

use std::sync::Arc;

use tracing::{info, warn};

use roster_allocation::allocate;
use roster_core::config::AllocationConfig;
use roster_core::error::AppError;
use roster_core::traits::{RosterLock, RosterStore};
use roster_core::types::{AssignmentEntry, RosterId, RosterState, Signup, SignupId, SignupStatus};

use super::outcome::{RemovalMode, SlotOutcome};

/// Serializes roster mutations and drives the allocation engine.
#[derive(Clone)]
pub struct SlotService {
    /// Roster and signup persistence.
    pub(super) store: Arc<dyn RosterStore>,
    /// Per-roster mutual exclusion.
    pub(super) gate: Arc<dyn RosterLock>,
    /// Capacity defaults and limits.
    pub(super) config: AllocationConfig,
}

impl std::fmt::Debug for SlotService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SlotService {
    /// Creates a new slot service.
    pub fn new(
        store: Arc<dyn RosterStore>,
        gate: Arc<dyn RosterLock>,
        config: AllocationConfig,
    ) -> Self {
        Self {
            store,
            gate,
            config,
        }
    }

    /// Recompute the assignment and waitlist from the current signups.
    ///
    /// Locked seats are left alone; previous occupants keep their seats.
    /// When `focus` is given, the outcome carries that signup's status.
    pub async fn reallocate(
        &self,
        roster_id: RosterId,
        focus: Option<SignupId>,
    ) -> Result<SlotOutcome, AppError> {
        let _guard = self.gate.acquire(roster_id).await?;
        let mut state = self.load(roster_id).await?;
        let signups = self.store.load_active_signups(roster_id).await?;

        apply_allocation(&mut state, &signups);
        self.commit(&state, "reallocate").await?;

        Ok(SlotOutcome::from_state(&state, focus))
    }

    /// Pin `signup_id` into `seat_index` and mark the seat locked.
    ///
    /// The signup leaves any other seat it held and the waitlist. A different
    /// previous occupant of the target seat is appended to the waitlist.
    /// No reallocation runs afterwards.
    pub async fn lock_seat(
        &self,
        roster_id: RosterId,
        seat_index: usize,
        signup_id: SignupId,
    ) -> Result<SlotOutcome, AppError> {
        let _guard = self.gate.acquire(roster_id).await?;
        let mut state = self.load(roster_id).await?;
        state.check_seat(seat_index)?;

        let signups = self.store.load_active_signups(roster_id).await?;
        if !signups.iter().any(|s| s.id == signup_id) {
            return Err(AppError::not_found(format!(
                "Signup {signup_id} not found in roster {roster_id}"
            )));
        }
        drop_inactive(&mut state, &signups);

        if let Some(previous_seat) = state.seat_of(signup_id) {
            if previous_seat != seat_index {
                state.assignment[previous_seat] = AssignmentEntry::empty();
            }
        }
        state.waitlist.retain(|id| *id != signup_id);

        let displaced = state.assignment[seat_index]
            .signup_id
            .filter(|id| *id != signup_id);
        if let Some(displaced) = displaced {
            if !state.waitlist.contains(&displaced) {
                state.waitlist.push(displaced);
            }
            warn!(
                roster_id = %roster_id,
                seat_index,
                displaced = %displaced,
                "Occupant moved to waitlist by seat lock"
            );
        }
        state.assignment[seat_index] = AssignmentEntry::occupied(signup_id, true);

        self.commit(&state, "lock_seat").await?;
        Ok(SlotOutcome::from_state(&state, Some(signup_id)))
    }

    /// Clear the lock flag on `seat_index`, then reallocate.
    ///
    /// The occupant stays put; the seat merely becomes eligible for
    /// relocation in later passes. Unlocking an unlocked seat is allowed.
    pub async fn unlock_seat(
        &self,
        roster_id: RosterId,
        seat_index: usize,
    ) -> Result<SlotOutcome, AppError> {
        let _guard = self.gate.acquire(roster_id).await?;
        let mut state = self.load(roster_id).await?;
        state.check_seat(seat_index)?;

        state.assignment[seat_index].locked = false;
        let occupant = state.assignment[seat_index].signup_id;

        let signups = self.store.load_active_signups(roster_id).await?;
        apply_allocation(&mut state, &signups);
        self.commit(&state, "unlock_seat").await?;

        Ok(SlotOutcome::from_state(&state, occupant))
    }

    /// Empty the seat held by `signup_id`, then backfill.
    ///
    /// With [`RemovalMode::Requeue`] the signup competes again in arrival
    /// order; with [`RemovalMode::Waitlist`] it is kept out of the backfill
    /// and appended to the end of the waitlist.
    pub async fn remove_from_seat(
        &self,
        roster_id: RosterId,
        signup_id: SignupId,
        mode: RemovalMode,
    ) -> Result<SlotOutcome, AppError> {
        let _guard = self.gate.acquire(roster_id).await?;
        let mut state = self.load(roster_id).await?;

        let seat_index = state.seat_of(signup_id).ok_or_else(|| {
            AppError::not_found(format!(
                "Signup {signup_id} holds no seat in roster {roster_id}"
            ))
        })?;
        state.assignment[seat_index] = AssignmentEntry::empty();

        let signups = self.store.load_active_signups(roster_id).await?;
        match mode {
            RemovalMode::Requeue => apply_allocation(&mut state, &signups),
            RemovalMode::Waitlist => {
                let others: Vec<Signup> = signups
                    .iter()
                    .filter(|s| s.id != signup_id)
                    .cloned()
                    .collect();
                let was_active = others.len() != signups.len();
                apply_allocation(&mut state, &others);
                if was_active {
                    state.waitlist.push(signup_id);
                }
            }
        }

        info!(
            roster_id = %roster_id,
            signup_id = %signup_id,
            seat_index,
            mode = ?mode,
            "Signup removed from seat"
        );
        self.commit(&state, "remove_from_seat").await?;
        Ok(SlotOutcome::from_state(&state, Some(signup_id)))
    }

    /// Exchange the occupants (with their lock flags) and the rules of two
    /// seats. No reallocation runs afterwards.
    pub async fn swap_seats(
        &self,
        roster_id: RosterId,
        seat_a: usize,
        seat_b: usize,
    ) -> Result<SlotOutcome, AppError> {
        let _guard = self.gate.acquire(roster_id).await?;
        let mut state = self.load(roster_id).await?;
        state.check_seat(seat_a)?;
        state.check_seat(seat_b)?;

        if seat_a == seat_b {
            return Ok(SlotOutcome::from_state(&state, None));
        }

        let signups = self.store.load_active_signups(roster_id).await?;
        drop_inactive(&mut state, &signups);
        state.assignment.swap(seat_a, seat_b);
        state.seat_rules.swap(seat_a, seat_b);
        self.commit(&state, "swap_seats").await
    }

    /// Read-only status lookup. Does not take the gate; concurrent with a
    /// mutation it observes either the old or the new persisted state.
    pub async fn query_status(
        &self,
        roster_id: RosterId,
        signup_id: SignupId,
    ) -> Result<SignupStatus, AppError> {
        let state = self.load(roster_id).await?;
        Ok(state.status_of(signup_id))
    }

    pub(super) async fn load(&self, roster_id: RosterId) -> Result<RosterState, AppError> {
        self.store
            .load_roster(roster_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Roster {roster_id} not found")))
    }

    pub(super) async fn commit(
        &self,
        state: &RosterState,
        operation: &'static str,
    ) -> Result<SlotOutcome, AppError> {
        self.store.persist_roster(state).await?;
        let outcome = SlotOutcome::from_state(state, None);
        info!(
            roster_id = %state.id,
            operation,
            allocated = outcome.allocation.allocated_count(),
            waitlisted = outcome.allocation.waitlist.len(),
            "Roster updated"
        );
        Ok(outcome)
    }
}

/// Empty seats and waitlist slots held by signups outside `active`.
///
/// A cancellation whose reallocation failed to persist leaves such ids in the
/// stored roster; operations that bypass the engine run this first.
pub(super) fn drop_inactive(state: &mut RosterState, active: &[Signup]) {
    let is_active = |id: &SignupId| active.iter().any(|s| s.id == *id);
    for entry in &mut state.assignment {
        if let Some(id) = entry.signup_id {
            if !is_active(&id) {
                warn!(roster_id = %state.id, signup_id = %id, "Clearing seat of inactive signup");
                *entry = AssignmentEntry::empty();
            }
        }
    }
    state.waitlist.retain(|id| is_active(id));
}

/// Run the engine against `state` and store its result back.
pub(super) fn apply_allocation(state: &mut RosterState, signups: &[Signup]) {
    let allocation = allocate(&state.seat_rules, signups, &state.assignment);
    state.assignment = allocation.assignment;
    state.waitlist = allocation.waitlist;
}
