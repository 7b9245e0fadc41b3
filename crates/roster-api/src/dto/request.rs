//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use roster_core::types::{NewSignup, SeatRule, SignupAttributes, SignupId};
use roster_service::RemovalMode;

/// Open roster request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OpenRosterRequest {
    /// Number of seats; the configured default when omitted.
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<usize>,
    /// One rule per seat; missing rules accept no one.
    #[serde(default)]
    pub seat_rules: Vec<SeatRule>,
}

/// Replace-all seat rules request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRulesRequest {
    /// New rule array, one entry per seat.
    #[validate(length(min = 1, message = "At least one seat rule is required"))]
    pub seat_rules: Vec<SeatRule>,
}

/// Register signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterSignupRequest {
    /// Class tag, e.g. `"tank"`.
    #[validate(length(max = 64))]
    pub class_tag: String,
    /// Sponsor flag.
    #[serde(default)]
    pub sponsor: bool,
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
}

impl From<RegisterSignupRequest> for NewSignup {
    fn from(req: RegisterSignupRequest) -> Self {
        Self {
            attributes: SignupAttributes {
                class_tag: req.class_tag,
                sponsor: req.sponsor,
            },
            display_name: req.display_name,
        }
    }
}

/// Lock seat request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LockSeatRequest {
    /// Signup to pin into the seat.
    #[validate(range(min = 1, message = "Invalid signup id"))]
    pub signup_id: i64,
}

impl LockSeatRequest {
    /// Typed signup id.
    pub fn signup_id(&self) -> SignupId {
        SignupId(self.signup_id)
    }
}

/// Swap seats request body. Range checks happen against the roster.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwapSeatsRequest {
    /// First seat index.
    pub seat_a: usize,
    /// Second seat index.
    pub seat_b: usize,
}

/// Query string for `DELETE .../seat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemovalQuery {
    /// Where the removed signup goes. The default, `requeue`, lets the
    /// signup compete again in arrival order, so a signup that still fits
    /// its seat is seated right back and the call changes nothing. Use
    /// `waitlist` to actually free the seat.
    #[serde(default)]
    pub mode: RemovalMode,
}

/// Query string for `POST .../reallocate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReallocateQuery {
    /// Signup whose status to report.
    pub signup_id: Option<SignupId>,
}
