//! Employee directory and assignment handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use super::{directory, path_id};
use crate::api::AppState;
use crate::domain::{
    authorize, Action, Actor, AssignmentInput, SyncOutcome, UserInput, UserResponse, UserRole,
    UserSummary,
};
use crate::errors::{AppResult, OptionExt};
use crate::types::{ApiResponse, Created};

const ROLE: UserRole = UserRole::Employee;

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route(
            "/:id/customers",
            get(list_employee_customers).put(set_employee_customers),
        )
}

/// List all employees
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "Employees sorted by name", body = Vec<UserResponse>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    directory::list(&state, &actor, ROLE).await
}

/// Get an employee (admin only)
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = UserResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    directory::show(&state, &actor, ROLE, &id).await
}

/// Create an employee (admin only)
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    request_body = UserInput,
    responses(
        (status = 201, description = "Employee created", body = UserResponse),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<Created<UserResponse>> {
    directory::create(&state, &actor, ROLE, payload).await
}

/// Update an employee (admin only)
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = String, Path, description = "Employee ID")),
    request_body = UserInput,
    responses(
        (status = 200, description = "Employee updated", body = UserResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Employee not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<ApiResponse<UserResponse>> {
    directory::update(&state, &actor, ROLE, &id, payload).await
}

/// Delete an employee with their assignments and shifts (admin only)
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    directory::delete(&state, &actor, ROLE, &id).await
}

/// Customers assigned to an employee (admin or the employee)
#[utoipa::path(
    get,
    path = "/employees/{id}/customers",
    tag = "Employees",
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Assigned customers sorted by name", body = Vec<UserSummary>),
        (status = 403, description = "Not the admin or this employee"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_employee_customers(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<UserSummary>>> {
    let id = Uuid::parse_str(&id).ok();
    authorize(
        &actor,
        Action::ViewAssignments {
            owner: id.unwrap_or_default(),
        },
    )?;

    let customers = state
        .assignment_service
        .customers_of(id.ok_or_not_found()?)
        .await?;
    Ok(ApiResponse::success(customers))
}

/// Replace the customers assigned to an employee (admin only)
#[utoipa::path(
    put,
    path = "/employees/{id}/customers",
    tag = "Employees",
    params(("id" = String, Path, description = "Employee ID")),
    request_body = AssignmentInput,
    responses(
        (status = 200, description = "Assignments replaced", body = SyncOutcome),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Employee not found"),
        (status = 422, description = "Unknown or non-customer ids")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_employee_customers(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<AssignmentInput>, JsonRejection>,
) -> AppResult<ApiResponse<SyncOutcome>> {
    authorize(&actor, Action::ReplaceAssignments)?;
    let employee = state.user_service.get(ROLE, path_id(&id)?).await?;
    let Json(input) = payload?;

    let outcome = state
        .assignment_service
        .set_employee_customers(&employee, input.customer_ids)
        .await?;
    Ok(ApiResponse::with_message(
        outcome,
        "Customers updated successfully.",
    ))
}
