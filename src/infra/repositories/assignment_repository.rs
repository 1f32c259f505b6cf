//! Read side of the employee ↔ customer assignment registry.
//!
//! Replacing an assignment set is a multi-statement operation and lives on
//! the transaction context (`TxAssignmentRepository`).

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use super::entities::assignment::{self, Entity as AssignmentEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::UserSummary;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Customers served by the employee, sorted by name
    async fn customers_of(&self, employee_id: Uuid) -> AppResult<Vec<UserSummary>>;

    /// Employees serving the customer, sorted by name
    async fn employees_of(&self, customer_id: Uuid) -> AppResult<Vec<UserSummary>>;
}

pub struct AssignmentStore {
    db: DatabaseConnection,
}

impl AssignmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Users on the `other` side of every link whose `side` column equals `id`.
    async fn linked(
        &self,
        side: assignment::Column,
        id: Uuid,
        other: assignment::Column,
    ) -> AppResult<Vec<UserSummary>> {
        let ids: Vec<Uuid> = AssignmentEntity::find()
            .select_only()
            .column(other)
            .filter(side.eq(id))
            .into_tuple()
            .all(&self.db)
            .await?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .order_by_asc(user::Column::Name)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(users.iter().map(UserSummary::from).collect())
    }
}

#[async_trait]
impl AssignmentRepository for AssignmentStore {
    async fn customers_of(&self, employee_id: Uuid) -> AppResult<Vec<UserSummary>> {
        self.linked(
            assignment::Column::EmployeeId,
            employee_id,
            assignment::Column::CustomerId,
        )
        .await
    }

    async fn employees_of(&self, customer_id: Uuid) -> AppResult<Vec<UserSummary>> {
        self.linked(
            assignment::Column::CustomerId,
            customer_id,
            assignment::Column::EmployeeId,
        )
        .await
    }
}
