//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AssignmentService, AuthService, ServiceContainer, Services, ShiftService, UserService,
};

/// Services and infrastructure shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub shift_service: Arc<dyn ShiftService>,
    pub assignment_service: Arc<dyn AssignmentService>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the real services over the database connection.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(&container, database)
    }

    /// Take the services from any container (mocked ones included).
    pub fn new(services: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            shift_service: services.shifts(),
            assignment_service: services.assignments(),
            database,
        }
    }
}
