//! # roster-core
//!
//! Core crate for the roster service. Contains configuration schemas,
//! typed identifiers, the roster value types consumed by the allocation
//! engine, the collaborator traits (`RosterStore`, `RosterLock`), and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other roster crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
