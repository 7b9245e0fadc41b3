//! # roster-allocation
//!
//! Seat allocation for rosters.
//!
//! ## Modules
//!
//! - `engine`: the deterministic, side-effect-free placement pass
//! - `gate`: per-roster mutual exclusion (in-memory keyed mutex table or
//!   PostgreSQL advisory lock)

pub mod engine;
pub mod gate;

pub use engine::allocate;
pub use gate::{MemoryRosterGate, RosterGate};
