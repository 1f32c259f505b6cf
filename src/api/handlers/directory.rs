//! Handler bodies shared by the employee and customer namespaces.

use axum::{extract::rejection::JsonRejection, Json};

use super::path_id;
use crate::api::AppState;
use crate::domain::{authorize, Action, Actor, UserInput, UserResponse, UserRole};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// "Employee" / "Customer", for response messages.
fn label(role: UserRole) -> &'static str {
    match role {
        UserRole::Employee => "Employee",
        UserRole::Customer => "Customer",
        UserRole::Admin => "Admin",
    }
}

pub(super) async fn list(
    state: &AppState,
    actor: &Actor,
    role: UserRole,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    authorize(actor, Action::ListUsers(role))?;

    let users = state.user_service.list(role).await?;
    Ok(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

pub(super) async fn show(
    state: &AppState,
    actor: &Actor,
    role: UserRole,
    id: &str,
) -> AppResult<ApiResponse<UserResponse>> {
    authorize(actor, Action::ViewUser(role))?;

    let user = state.user_service.get(role, path_id(id)?).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

pub(super) async fn create(
    state: &AppState,
    actor: &Actor,
    role: UserRole,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<Created<UserResponse>> {
    authorize(actor, Action::CreateUser(role))?;
    let Json(input) = payload?;

    let user = state.user_service.create(role, input).await?;
    Ok(Created(ApiResponse::with_message(
        UserResponse::from(user),
        format!("{} created successfully.", label(role)),
    )))
}

pub(super) async fn update(
    state: &AppState,
    actor: &Actor,
    role: UserRole,
    id: &str,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<ApiResponse<UserResponse>> {
    authorize(actor, Action::UpdateUser(role))?;
    let existing = state.user_service.get(role, path_id(id)?).await?;
    let Json(input) = payload?;

    let user = state.user_service.update(role, existing.id, input).await?;
    Ok(ApiResponse::with_message(
        UserResponse::from(user),
        format!("{} updated successfully.", label(role)),
    ))
}

pub(super) async fn delete(
    state: &AppState,
    actor: &Actor,
    role: UserRole,
    id: &str,
) -> AppResult<ApiResponse<()>> {
    authorize(actor, Action::DeleteUser(role))?;

    state.user_service.delete(role, path_id(id)?).await?;
    Ok(ApiResponse::message(format!(
        "{} deleted successfully.",
        label(role)
    )))
}
