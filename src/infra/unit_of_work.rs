//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-statement operations
//! (assignment sync, cascading user delete) inside one database transaction.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::repositories::entities::{assignment, shift, user};
use super::repositories::{
    AssignmentRepository, AssignmentStore, ShiftRepository, ShiftStore, UserRepository, UserStore,
};
use crate::domain::SyncOutcome;
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction method; service
/// tests provide their own implementation over mocked repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn shifts(&self) -> Arc<dyn ShiftRepository>;

    fn assignments(&self) -> Arc<dyn AssignmentRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed on success, rolled back on error. ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn assignments(&self) -> TxAssignmentRepository<'_> {
        TxAssignmentRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    shift_repo: Arc<ShiftStore>,
    assignment_repo: Arc<AssignmentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            shift_repo: Arc::new(ShiftStore::new(db.clone())),
            assignment_repo: Arc::new(AssignmentStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn shifts(&self) -> Arc<dyn ShiftRepository> {
        self.shift_repo.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentRepository> {
        self.assignment_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user operations.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    /// Hard delete a user with every assignment and shift referencing it.
    pub async fn delete_cascading(&self, id: Uuid) -> AppResult<()> {
        let links = assignment::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(assignment::Column::EmployeeId.eq(id))
                    .add(assignment::Column::CustomerId.eq(id)),
            )
            .exec(self.txn)
            .await?;

        let shifts = shift::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(shift::Column::EmployeeId.eq(id))
                    .add(shift::Column::CustomerId.eq(id)),
            )
            .exec(self.txn)
            .await?;

        let result = user::Entity::delete_by_id(id).exec(self.txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(
            user_id = %id,
            assignments = links.rows_affected,
            shifts = shifts.rows_affected,
            "user deleted"
        );
        Ok(())
    }
}

/// Transaction-aware assignment operations.
pub struct TxAssignmentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAssignmentRepository<'a> {
    pub async fn customer_ids_of(&self, employee_id: Uuid) -> AppResult<BTreeSet<Uuid>> {
        let ids: Vec<Uuid> = assignment::Entity::find()
            .select_only()
            .column(assignment::Column::CustomerId)
            .filter(assignment::Column::EmployeeId.eq(employee_id))
            .into_tuple()
            .all(self.txn)
            .await?;

        Ok(ids.into_iter().collect())
    }

    /// Replace the employee's customer set with `desired`.
    ///
    /// Pairs present in both sets are left untouched.
    pub async fn sync_customers(
        &self,
        employee_id: Uuid,
        desired: &BTreeSet<Uuid>,
    ) -> AppResult<SyncOutcome> {
        let current = self.customer_ids_of(employee_id).await?;
        let outcome = SyncOutcome::plan(&current, desired);

        if !outcome.detached.is_empty() {
            assignment::Entity::delete_many()
                .filter(assignment::Column::EmployeeId.eq(employee_id))
                .filter(assignment::Column::CustomerId.is_in(outcome.detached.clone()))
                .exec(self.txn)
                .await?;
        }

        if !outcome.attached.is_empty() {
            let now = chrono::Utc::now();
            let rows = outcome.attached.iter().map(|customer_id| assignment::ActiveModel {
                employee_id: Set(employee_id),
                customer_id: Set(*customer_id),
                created_at: Set(now),
            });
            assignment::Entity::insert_many(rows)
                .exec_without_returning(self.txn)
                .await?;
        }

        tracing::info!(
            employee_id = %employee_id,
            attached = outcome.attached.len(),
            detached = outcome.detached.len(),
            "assignments synced"
        );
        Ok(outcome)
    }
}

/// Run a block inside `UnitOfWork::transaction`.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
