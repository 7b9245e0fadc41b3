//! Keyed mutual exclusion for roster mutations.

use std::any::Any;
use std::fmt;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::RosterId;

/// Proof that the caller holds the gate for one roster.
///
/// The gate is released when the guard is dropped. Implementations box
/// whatever keeps their lock alive (a mutex guard, a pooled connection).
pub struct RosterGuard {
    roster_id: RosterId,
    _held: Box<dyn Any + Send>,
}

impl RosterGuard {
    /// Wrap an implementation-specific guard.
    pub fn new(roster_id: RosterId, held: impl Any + Send) -> Self {
        Self {
            roster_id,
            _held: Box::new(held),
        }
    }

    /// The roster this guard serializes.
    pub fn roster_id(&self) -> RosterId {
        self.roster_id
    }
}

impl fmt::Debug for RosterGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RosterGuard")
            .field("roster_id", &self.roster_id)
            .finish_non_exhaustive()
    }
}

/// At most one holder per roster id at a time.
///
/// Operations on different roster ids never block each other. A caller that
/// stops waiting simply drops the pending future; it never releases another
/// holder's guard.
#[async_trait]
pub trait RosterLock: Send + Sync + 'static {
    /// Wait until the gate for `roster_id` is free and take it.
    async fn acquire(&self, roster_id: RosterId) -> AppResult<RosterGuard>;
}
