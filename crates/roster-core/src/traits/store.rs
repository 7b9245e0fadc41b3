//! Roster persistence collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{NewSignup, RosterId, RosterState, SeatRule, Signup, SignupId};

/// Persistence operations the slot mutation service relies on.
///
/// Implementations must make [`persist_roster`](Self::persist_roster) a
/// single atomic write: either the whole new assignment, waitlist, and
/// rule array are stored, or the previous state is left untouched.
#[async_trait]
pub trait RosterStore: Send + Sync + 'static {
    /// Load a roster snapshot. `None` if the roster does not exist.
    async fn load_roster(&self, roster_id: RosterId) -> AppResult<Option<RosterState>>;

    /// Load the roster's non-cancelled signups ordered by arrival key.
    async fn load_active_signups(&self, roster_id: RosterId) -> AppResult<Vec<Signup>>;

    /// Replace the roster's assignment, waitlist, and seat rules.
    async fn persist_roster(&self, state: &RosterState) -> AppResult<()>;

    /// Create a roster with empty seats and waitlist.
    async fn create_roster(
        &self,
        capacity: usize,
        seat_rules: Vec<SeatRule>,
    ) -> AppResult<RosterState>;

    /// Record a signup; the store assigns id and arrival key.
    async fn create_signup(&self, roster_id: RosterId, signup: &NewSignup) -> AppResult<Signup>;

    /// Mark a signup cancelled. Cancelling twice is not an error;
    /// an unknown signup is `NotFound`.
    async fn cancel_signup(&self, roster_id: RosterId, signup_id: SignupId) -> AppResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
