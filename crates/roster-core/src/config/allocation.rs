//! Seat allocation configuration.

use serde::{Deserialize, Serialize};

/// Which per-roster mutual exclusion to use for mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateBackend {
    /// In-process keyed mutex table (single node).
    #[default]
    Memory,
    /// PostgreSQL session advisory lock (multiple nodes sharing one database).
    Advisory,
}

/// Seat allocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Capacity used when a roster is opened without one.
    #[serde(default = "default_capacity")]
    pub default_capacity: usize,
    /// Largest capacity accepted when opening a roster.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: usize,
    /// Gate implementation.
    #[serde(default)]
    pub gate: GateBackend,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            default_capacity: default_capacity(),
            max_capacity: default_max_capacity(),
            gate: GateBackend::default(),
        }
    }
}

fn default_capacity() -> usize {
    25
}

fn default_max_capacity() -> usize {
    100
}
