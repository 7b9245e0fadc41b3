//! # roster-api
//!
//! HTTP API layer for the roster service built on Axum.
//!
//! Provides the REST endpoints for rosters, signups, and seat mutations,
//! middleware (CORS, request logging), a validating JSON extractor, DTOs,
//! and the mapping from `AppError` to HTTP responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
