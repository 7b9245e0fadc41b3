//! Roster and signup lifecycle operations that feed the allocator.

use tracing::info;

use roster_core::error::AppError;
use roster_core::types::{NewSignup, RosterId, RosterState, SeatRule, SignupAttributes, SignupId};

use super::outcome::SlotOutcome;
use super::service::{SlotService, apply_allocation};

impl SlotService {
    /// Opens a roster with empty seats and an empty waitlist.
    ///
    /// `capacity` defaults to the configured default and must lie in
    /// `1..=max_capacity`. Missing rules are padded with reject-all rules.
    pub async fn open_roster(
        &self,
        capacity: Option<usize>,
        seat_rules: Vec<SeatRule>,
    ) -> Result<RosterState, AppError> {
        let capacity = capacity.unwrap_or(self.config.default_capacity);
        if capacity == 0 || capacity > self.config.max_capacity {
            return Err(AppError::invalid_argument(format!(
                "Capacity must be between 1 and {}, got {capacity}",
                self.config.max_capacity
            )));
        }
        if seat_rules.len() > capacity {
            return Err(AppError::invalid_argument(format!(
                "{} seat rules given for {capacity} seats",
                seat_rules.len()
            )));
        }
        for rule in &seat_rules {
            rule.validate()?;
        }

        let state = self.store.create_roster(capacity, seat_rules).await?;
        info!(roster_id = %state.id, capacity, "Roster opened");
        Ok(state)
    }

    /// Replaces every seat rule and reallocates under the same gate hold.
    ///
    /// Occupants whose seat no longer admits them keep the seat.
    pub async fn update_rules(
        &self,
        roster_id: RosterId,
        seat_rules: Vec<SeatRule>,
    ) -> Result<SlotOutcome, AppError> {
        for rule in &seat_rules {
            rule.validate()?;
        }

        let _guard = self.gate.acquire(roster_id).await?;
        let mut state = self.load(roster_id).await?;
        if seat_rules.len() != state.capacity {
            return Err(AppError::invalid_argument(format!(
                "Roster {roster_id} has {} seats but {} rules were given",
                state.capacity,
                seat_rules.len()
            )));
        }

        state.seat_rules = seat_rules;
        let signups = self.store.load_active_signups(roster_id).await?;
        apply_allocation(&mut state, &signups);
        self.commit(&state, "update_rules").await
    }

    /// Records a signup and reallocates with it as focus.
    pub async fn register_signup(
        &self,
        roster_id: RosterId,
        signup: NewSignup,
    ) -> Result<SlotOutcome, AppError> {
        let signup = NewSignup {
            attributes: SignupAttributes {
                class_tag: signup.attributes.class_tag.trim().to_string(),
                sponsor: signup.attributes.sponsor,
            },
            display_name: signup.display_name,
        };
        if signup.attributes.class_tag.is_empty() && !signup.attributes.sponsor {
            return Err(AppError::invalid_argument(
                "A class tag is required for non-sponsor signups",
            ));
        }

        let created = self.store.create_signup(roster_id, &signup).await?;
        info!(
            roster_id = %roster_id,
            signup_id = %created.id,
            class_tag = %created.attributes.class_tag,
            sponsor = created.attributes.sponsor,
            "Signup registered"
        );
        self.reallocate(roster_id, Some(created.id)).await
    }

    /// Marks a signup cancelled and reallocates so the waitlist can backfill.
    ///
    /// Cancelling an already cancelled signup only reallocates.
    pub async fn cancel_signup(
        &self,
        roster_id: RosterId,
        signup_id: SignupId,
    ) -> Result<SlotOutcome, AppError> {
        self.store.cancel_signup(roster_id, signup_id).await?;
        info!(roster_id = %roster_id, signup_id = %signup_id, "Signup cancelled");
        self.reallocate(roster_id, Some(signup_id)).await
    }

    /// Persisted roster snapshot, read outside the gate.
    pub async fn get_roster(&self, roster_id: RosterId) -> Result<SlotOutcome, AppError> {
        let state = self.load(roster_id).await?;
        Ok(SlotOutcome::from_state(&state, None))
    }
}
