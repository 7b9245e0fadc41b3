//! # roster-entity
//!
//! Database row models for the roster service. Every struct in this crate
//! represents a table row and derives `sqlx::FromRow`; conversions turn
//! rows into the value types the allocation core works with.

pub mod roster;
pub mod signup;

pub use roster::RosterRow;
pub use signup::SignupRow;
