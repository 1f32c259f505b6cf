//! HTTP request handlers.

pub mod auth_handler;
pub mod customer_handler;
mod directory;
pub mod employee_handler;
pub mod shift_handler;

pub use auth_handler::auth_routes;
pub use customer_handler::customer_routes;
pub use employee_handler::employee_routes;
pub use shift_handler::shift_routes;

use uuid::Uuid;

use crate::errors::{AppResult, OptionExt};

/// Path ids that do not parse name nothing, so they are 404s.
pub(crate) fn path_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).ok().ok_or_not_found()
}
