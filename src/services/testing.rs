//! Unit of Work over mocked repositories for service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    AssignmentRepository, MockAssignmentRepository, MockShiftRepository, MockUserRepository,
    ShiftRepository, TransactionContext, UnitOfWork, UserRepository,
};

pub(crate) struct MockUow {
    users: Arc<MockUserRepository>,
    shifts: Arc<MockShiftRepository>,
    assignments: Arc<MockAssignmentRepository>,
}

impl MockUow {
    pub(crate) fn new(
        users: MockUserRepository,
        shifts: MockShiftRepository,
        assignments: MockAssignmentRepository,
    ) -> Arc<Self> {
        Arc::new(Self {
            users: Arc::new(users),
            shifts: Arc::new(shifts),
            assignments: Arc::new(assignments),
        })
    }

    pub(crate) fn with_users(users: MockUserRepository) -> Arc<Self> {
        Self::new(users, MockShiftRepository::new(), MockAssignmentRepository::new())
    }
}

#[async_trait]
impl UnitOfWork for MockUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn shifts(&self) -> Arc<dyn ShiftRepository> {
        self.shifts.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentRepository> {
        self.assignments.clone()
    }

    // Transactions need a live connection; tests/ covers them.
    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("transaction reached in unit test"))
    }
}

pub(crate) fn user(role: UserRole, name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password_hash: String::new(),
        role,
        phone: None,
        hourly_rate: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
