//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{AppError, FieldErrors};

/// JSON body that has passed its `validator` rules.
///
/// Only for public endpoints. Guarded endpoints take `Result<Json<T>, _>`
/// so the access check runs before the body is judged.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| AppError::Validation(FieldErrors::from(e)))?;

        Ok(ValidatedJson(value))
    }
}
