//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure. They depend on the
//! Unit of Work abstraction for repository access and transactions.

mod assignment_service;
mod auth_service;
pub mod container;
mod shift_service;
mod user_service;

#[cfg(test)]
pub(crate) mod testing;

pub use container::{ServiceContainer, Services};

pub use assignment_service::{AssignmentManager, AssignmentService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use shift_service::{ShiftListing, ShiftManager, ShiftService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
