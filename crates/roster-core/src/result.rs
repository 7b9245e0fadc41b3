//! Convenience result type alias for the roster service.

use crate::error::AppError;

/// A specialized `Result` type for roster operations.
pub type AppResult<T> = Result<T, AppError>;
