//! # roster-service
//!
//! Business logic for roster seat management. [`SlotService`] is the only
//! entry point that mutates a roster: every mutation takes the roster's
//! gate, loads the current snapshot, derives the new state in memory, and
//! persists it with a single write before releasing the gate.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod slot;

pub use slot::{FocusedSignup, RemovalMode, SlotOutcome, SlotService};
