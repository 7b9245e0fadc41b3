//! HTTP request handlers organized by domain.

pub mod health;
pub mod roster;
pub mod signup;
pub mod slot;
