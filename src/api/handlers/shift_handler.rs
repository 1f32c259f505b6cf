//! Shift handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};

use super::path_id;
use crate::api::AppState;
use crate::domain::{authorize, Action, Actor, RawShiftFilters, ShiftInput, ShiftRecord};
use crate::errors::AppResult;
use crate::services::ShiftListing;
use crate::types::{ApiResponse, Created};

/// Create shift routes
pub fn shift_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shifts).post(create_shift))
        .route("/:id", put(update_shift).delete(delete_shift))
}

/// List shifts visible to the caller
///
/// Customers only see their own shifts and employees only their own; the
/// party filters they send are replaced accordingly.
#[utoipa::path(
    get,
    path = "/shifts",
    tag = "Shifts",
    params(RawShiftFilters),
    responses(
        (status = 200, description = "Shifts, dropdown sources and applied filters", body = ShiftListing),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Invalid filter values")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_shifts(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(filters): Query<RawShiftFilters>,
) -> AppResult<ApiResponse<ShiftListing>> {
    authorize(&actor, Action::ListShifts)?;

    let listing = state.shift_service.list_shifts(&actor, filters).await?;
    Ok(ApiResponse::success(listing))
}

/// Create a shift (admin only)
#[utoipa::path(
    post,
    path = "/shifts",
    tag = "Shifts",
    request_body = ShiftInput,
    responses(
        (status = 201, description = "Shift created", body = ShiftRecord),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_shift(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<ShiftInput>, JsonRejection>,
) -> AppResult<Created<ShiftRecord>> {
    authorize(&actor, Action::CreateShift)?;
    let Json(input) = payload?;

    let shift = state.shift_service.create_shift(input).await?;
    Ok(Created(ApiResponse::with_message(
        shift,
        "Shift created successfully.",
    )))
}

/// Update a shift (admin only)
#[utoipa::path(
    put,
    path = "/shifts/{id}",
    tag = "Shifts",
    params(("id" = String, Path, description = "Shift ID")),
    request_body = ShiftInput,
    responses(
        (status = 200, description = "Shift updated", body = ShiftRecord),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Shift not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_shift(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<ShiftInput>, JsonRejection>,
) -> AppResult<ApiResponse<ShiftRecord>> {
    authorize(&actor, Action::UpdateShift)?;
    let shift = state.shift_service.find_shift(path_id(&id)?).await?;
    let Json(input) = payload?;

    let updated = state.shift_service.update_shift(&shift, input).await?;
    Ok(ApiResponse::with_message(updated, "Shift updated successfully."))
}

/// Delete a shift (admin only)
#[utoipa::path(
    delete,
    path = "/shifts/{id}",
    tag = "Shifts",
    params(("id" = String, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Shift not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_shift(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    authorize(&actor, Action::DeleteShift)?;

    state.shift_service.delete_shift(path_id(&id)?).await?;
    Ok(ApiResponse::message("Shift deleted successfully."))
}
