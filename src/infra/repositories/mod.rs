//! Repository layer - Data access abstraction
//!
//! Single-statement reads and writes live here; multi-statement operations
//! run through the transaction context of the unit of work.

mod assignment_repository;
pub(crate) mod entities;
mod shift_repository;
mod user_repository;

pub use assignment_repository::{AssignmentRepository, AssignmentStore};
pub use shift_repository::{ShiftRepository, ShiftStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use assignment_repository::MockAssignmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use shift_repository::MockShiftRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
