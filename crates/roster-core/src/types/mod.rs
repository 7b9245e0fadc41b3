//! Core type definitions used across the roster workspace.

pub mod allocation;
pub mod id;
pub mod roster;
pub mod rule;
pub mod signup;

pub use allocation::{Allocation, SignupStatus};
pub use id::*;
pub use roster::{AssignmentEntry, RosterState};
pub use rule::SeatRule;
pub use signup::{ArrivalKey, NewSignup, Signup, SignupAttributes};
