//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, repositories and the Unit of Work.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    AssignmentRepository, AssignmentStore, ShiftRepository, ShiftStore, UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxAssignmentRepository, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockAssignmentRepository, MockShiftRepository, MockUserRepository};
