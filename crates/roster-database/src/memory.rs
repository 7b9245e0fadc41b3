//! Process-local roster store using concurrent maps.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use roster_core::error::AppError;
use roster_core::result::AppResult;
use roster_core::traits::RosterStore;
use roster_core::types::{
    ArrivalKey, NewSignup, RosterId, RosterState, SeatRule, Signup, SignupId,
};

#[derive(Debug, Clone)]
struct StoredSignup {
    roster_id: RosterId,
    signup: Signup,
    cancelled: bool,
}

#[derive(Debug, Default)]
struct Inner {
    rosters: DashMap<RosterId, RosterState>,
    signups: DashMap<SignupId, StoredSignup>,
    next_roster: AtomicI64,
    next_signup: AtomicI64,
    fail_persist: AtomicBool,
}

/// In-memory [`RosterStore`]. State is lost when the process exits.
///
/// Suitable for single-node development setups and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRosterStore {
    inner: Arc<Inner>,
}

impl MemoryRosterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `persist_roster` fail until reset.
    #[cfg(any(test, feature = "testing"))]
    pub fn fail_persist(&self, fail: bool) {
        self.inner.fail_persist.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RosterStore for MemoryRosterStore {
    async fn load_roster(&self, roster_id: RosterId) -> AppResult<Option<RosterState>> {
        Ok(self
            .inner
            .rosters
            .get(&roster_id)
            .map(|r| r.value().clone().normalized()))
    }

    async fn load_active_signups(&self, roster_id: RosterId) -> AppResult<Vec<Signup>> {
        let mut signups: Vec<Signup> = self
            .inner
            .signups
            .iter()
            .filter(|s| s.roster_id == roster_id && !s.cancelled)
            .map(|s| s.signup.clone())
            .collect();
        signups.sort_by_key(|s| (s.arrival, s.id));
        Ok(signups)
    }

    async fn persist_roster(&self, state: &RosterState) -> AppResult<()> {
        if self.inner.fail_persist.load(Ordering::SeqCst) {
            return Err(AppError::persistence(format!(
                "Failed to persist roster {}",
                state.id
            )));
        }
        match self.inner.rosters.get_mut(&state.id) {
            Some(mut stored) => {
                *stored = state.clone();
                debug!(roster_id = %state.id, "Roster persisted");
                Ok(())
            }
            None => Err(AppError::not_found(format!("Roster {} not found", state.id))),
        }
    }

    async fn create_roster(
        &self,
        capacity: usize,
        seat_rules: Vec<SeatRule>,
    ) -> AppResult<RosterState> {
        let id = RosterId(self.inner.next_roster.fetch_add(1, Ordering::SeqCst) + 1);
        let state = RosterState::open(id, capacity, seat_rules);
        self.inner.rosters.insert(id, state.clone());
        Ok(state)
    }

    async fn create_signup(&self, roster_id: RosterId, signup: &NewSignup) -> AppResult<Signup> {
        if !self.inner.rosters.contains_key(&roster_id) {
            return Err(AppError::not_found(format!("Roster {roster_id} not found")));
        }
        let sequence = self.inner.next_signup.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Signup {
            id: SignupId(sequence),
            attributes: signup.attributes.clone(),
            arrival: ArrivalKey {
                created_at: Utc::now(),
                sequence,
            },
            display_name: signup.display_name.clone(),
        };
        self.inner.signups.insert(
            created.id,
            StoredSignup {
                roster_id,
                signup: created.clone(),
                cancelled: false,
            },
        );
        Ok(created)
    }

    async fn cancel_signup(&self, roster_id: RosterId, signup_id: SignupId) -> AppResult<()> {
        match self.inner.signups.get_mut(&signup_id) {
            Some(mut stored) if stored.roster_id == roster_id => {
                stored.cancelled = true;
                Ok(())
            }
            _ => Err(AppError::not_found(format!(
                "Signup {signup_id} not found in roster {roster_id}"
            ))),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
