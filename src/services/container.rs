//! Service Container - Centralized service access.
//!
//! Handlers depend on the service traits only; the container wires the
//! concrete managers over one shared Unit of Work.

use std::sync::Arc;

use super::{AssignmentService, AuthService, ShiftService, UserService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn shifts(&self) -> Arc<dyn ShiftService>;

    fn assignments(&self) -> Arc<dyn AssignmentService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    shift_service: Arc<dyn ShiftService>,
    assignment_service: Arc<dyn AssignmentService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        shift_service: Arc<dyn ShiftService>,
        assignment_service: Arc<dyn AssignmentService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            shift_service,
            assignment_service,
        }
    }

    /// Build every service over one database connection.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{AssignmentManager, Authenticator, ShiftManager, UserManager};

        let uow = Arc::new(Persistence::new(db));

        Self::new(
            Arc::new(Authenticator::new(uow.clone(), config)),
            Arc::new(UserManager::new(uow.clone())),
            Arc::new(ShiftManager::new(uow.clone())),
            Arc::new(AssignmentManager::new(uow)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn shifts(&self) -> Arc<dyn ShiftService> {
        self.shift_service.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentService> {
        self.assignment_service.clone()
    }
}
