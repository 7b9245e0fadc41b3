//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod allocation;
pub mod app;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::allocation::{AllocationConfig, GateBackend};
pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Roster store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Seat allocation settings.
    #[serde(default)]
    pub allocation: AllocationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `ROSTER__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ROSTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that cannot be wired together.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.allocation.gate == GateBackend::Advisory
            && self.database.backend != StoreBackend::Postgres
        {
            return Err(AppError::configuration(
                "allocation.gate = \"advisory\" requires database.backend = \"postgres\"",
            ));
        }
        if self.allocation.gate == GateBackend::Advisory && self.database.gate_max_connections == 0 {
            return Err(AppError::configuration(
                "database.gate_max_connections must be at least 1 for the advisory gate",
            ));
        }
        if self.allocation.default_capacity == 0
            || self.allocation.default_capacity > self.allocation.max_capacity
        {
            return Err(AppError::configuration(format!(
                "allocation.default_capacity must be within 1..={}",
                self.allocation.max_capacity
            )));
        }
        Ok(())
    }
}
