//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use roster_core::config::AppConfig;
use roster_core::traits::RosterStore;
use roster_service::SlotService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Roster store, used directly only for health checks
    pub store: Arc<dyn RosterStore>,
    /// Seat mutation service
    pub slot_service: Arc<SlotService>,
}
