//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, customer_handler, employee_handler, shift_handler};
use crate::domain::{
    AssignmentInput, EffectiveFilters, ServiceKind, ShiftInput, ShiftRecord, ShiftStatus,
    SyncOutcome, UserInput, UserResponse, UserRole, UserSummary,
};
use crate::services::{ShiftListing, TokenResponse};

/// OpenAPI documentation for shiftdesk
#[derive(OpenApi)]
#[openapi(
    info(
        title = "shiftdesk",
        version = "0.1.0",
        description = "Shift scheduling for a massage and skin-therapy practice"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        shift_handler::list_shifts,
        shift_handler::create_shift,
        shift_handler::update_shift,
        shift_handler::delete_shift,
        employee_handler::list_employees,
        employee_handler::get_employee,
        employee_handler::create_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        employee_handler::list_employee_customers,
        employee_handler::set_employee_customers,
        customer_handler::list_customers,
        customer_handler::get_customer,
        customer_handler::create_customer,
        customer_handler::update_customer,
        customer_handler::delete_customer,
        customer_handler::list_customer_employees,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            UserSummary,
            UserInput,
            ServiceKind,
            ShiftStatus,
            ShiftInput,
            ShiftRecord,
            ShiftListing,
            EffectiveFilters,
            AssignmentInput,
            SyncOutcome,
            auth_handler::LoginRequest,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login"),
        (name = "Shifts", description = "Scheduled sessions"),
        (name = "Employees", description = "Employee directory and assignments"),
        (name = "Customers", description = "Customer directory")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
