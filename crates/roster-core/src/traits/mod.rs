//! Collaborator traits consumed by the slot mutation service.

pub mod lock;
pub mod store;

pub use lock::{RosterGuard, RosterLock};
pub use store::RosterStore;
