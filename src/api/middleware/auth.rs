//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{Actor, UserRole};
use crate::errors::AppError;

/// JWT authentication middleware.
///
/// Validates the bearer token and injects the [`Actor`] into the request
/// extensions. A token whose role claim is not a known role is rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let role = claims.role.parse::<UserRole>().map_err(|e| {
        tracing::warn!(user_id = %claims.sub, "rejected token: {}", e);
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(Actor::new(claims.sub, role));

    Ok(next.run(request).await)
}
