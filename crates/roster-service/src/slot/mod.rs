//! Seat mutation operations and roster lifecycle hooks.

pub mod lifecycle;
pub mod outcome;
pub mod service;


pub use outcome::{FocusedSignup, RemovalMode, SlotOutcome};
pub use service::SlotService;
