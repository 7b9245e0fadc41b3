//! Repositories for the roster tables.

pub mod roster;
pub mod signup;

pub use roster::RosterRepository;
pub use signup::SignupRepository;
