//! Customer directory handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use super::directory;
use crate::api::AppState;
use crate::domain::{authorize, Action, Actor, UserInput, UserResponse, UserRole, UserSummary};
use crate::errors::{AppResult, OptionExt};
use crate::types::{ApiResponse, Created};

const ROLE: UserRole = UserRole::Customer;

/// Create customer routes
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/:id/employees", get(list_customer_employees))
}

/// List all customers
#[utoipa::path(
    get,
    path = "/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "Customers sorted by name", body = Vec<UserResponse>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    directory::list(&state, &actor, ROLE).await
}

/// Get a customer (admin only)
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer found", body = UserResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    directory::show(&state, &actor, ROLE, &id).await
}

/// Create a customer (admin only)
///
/// The password is optional; without one the customer cannot log in.
#[utoipa::path(
    post,
    path = "/customers",
    tag = "Customers",
    request_body = UserInput,
    responses(
        (status = 201, description = "Customer created", body = UserResponse),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<Created<UserResponse>> {
    directory::create(&state, &actor, ROLE, payload).await
}

/// Update a customer (admin only)
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "Customer ID")),
    request_body = UserInput,
    responses(
        (status = 200, description = "Customer updated", body = UserResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Customer not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<ApiResponse<UserResponse>> {
    directory::update(&state, &actor, ROLE, &id, payload).await
}

/// Delete a customer with their assignments and shifts (admin only)
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    directory::delete(&state, &actor, ROLE, &id).await
}

/// Employees serving a customer (admin or the customer)
#[utoipa::path(
    get,
    path = "/customers/{id}/employees",
    tag = "Customers",
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Assigned employees sorted by name", body = Vec<UserSummary>),
        (status = 403, description = "Not the admin or this customer"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customer_employees(
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

    let employees = state
        .assignment_service
        .employees_of(id.ok_or_not_found()?)
        .await?;
    Ok(ApiResponse::success(employees))
}
