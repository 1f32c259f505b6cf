//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    /// User password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email.trim().to_string(), payload.password)
        .await?;

    Ok(Json(token))
}
