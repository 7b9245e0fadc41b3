//! Response DTOs.

use serde::{Deserialize, Serialize};

use roster_core::types::{RosterId, RosterState, SignupId, SignupStatus};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Whether the roster store answered.
    pub store: bool,
}

/// Freshly opened roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCreatedResponse {
    /// Roster id.
    pub roster_id: RosterId,
    /// Number of seats.
    pub capacity: usize,
}

impl From<&RosterState> for RosterCreatedResponse {
    fn from(state: &RosterState) -> Self {
        Self {
            roster_id: state.id,
            capacity: state.capacity,
        }
    }
}

/// Status of one signup.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Roster id.
    pub roster_id: RosterId,
    /// Signup id.
    pub signup_id: SignupId,
    /// Allocated, waitlisted, or unallocated.
    #[serde(flatten)]
    pub status: SignupStatus,
}
