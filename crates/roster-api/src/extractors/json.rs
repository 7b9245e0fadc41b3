//! JSON body extractor that runs `validator` rules before the handler.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use roster_core::error::AppError;

use crate::error::ApiError;

/// Deserialized and validated JSON request body.
///
/// Malformed JSON and failed validation both surface as
/// `INVALID_ARGUMENT` responses.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_argument(rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::invalid_argument(format!("Validation failed: {e}")))?;

        Ok(Self(value))
    }
}
