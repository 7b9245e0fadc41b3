//! # roster-database
//!
//! PostgreSQL connection management, repositories for the `rosters` and
//! `signups` tables, and the two [`RosterStore`](roster_core::traits::RosterStore)
//! implementations: [`PgRosterStore`] and the process-local
//! [`MemoryRosterStore`].

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use connection::RosterPools;
pub use memory::MemoryRosterStore;
pub use store::PgRosterStore;
