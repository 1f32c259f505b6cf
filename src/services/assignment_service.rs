//! Assignment service - which customers each employee serves.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::shift::parse_id;
use crate::domain::{SyncOutcome, User, UserRole, UserSummary};
use crate::errors::{AppError, AppResult, FieldErrors, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait AssignmentService: Send + Sync {
    /// Replace the customer set of an already loaded employee atomically
    async fn set_employee_customers(
        &self,
        employee: &User,
        customer_ids: Vec<String>,
    ) -> AppResult<SyncOutcome>;

    async fn customers_of(&self, employee_id: Uuid) -> AppResult<Vec<UserSummary>>;

    async fn employees_of(&self, customer_id: Uuid) -> AppResult<Vec<UserSummary>>;
}

pub struct AssignmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AssignmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// 404 unless `id` is a user with `role`.
    async fn require(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .filter(|u| u.has_role(role))
            .map(|_| ())
            .ok_or_not_found()
    }

    /// Parse and deduplicate the ids, keeping only existing customers.
    async fn resolve_customers(&self, raw: &[String]) -> AppResult<BTreeSet<Uuid>> {
        let mut invalid: Vec<&str> = Vec::new();
        let mut ids = BTreeSet::new();
        for value in raw {
            match parse_id("customer_ids", value.trim()) {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(_) => invalid.push(value.as_str()),
            }
        }

        let roles: HashMap<Uuid, UserRole> = self
            .uow
            .users()
            .find_many(ids.iter().copied().collect())
            .await?
            .into_iter()
            .map(|u| (u.id, u.role))
            .collect();
        let not_customers: Vec<String> = ids
            .iter()
            .filter(|id| roles.get(id) != Some(&UserRole::Customer))
            .map(Uuid::to_string)
            .collect();

        let mut errors = FieldErrors::new();
        if !invalid.is_empty() || !not_customers.is_empty() {
            let mut offending: Vec<String> = invalid.iter().map(|s| s.to_string()).collect();
            offending.extend(not_customers);
            errors.add(
                "customer_ids",
                format!("The selected customers are invalid: {}", offending.join(", ")),
            );
        }
        errors.into_result()?;

        Ok(ids)
    }
}

#[async_trait]
impl<U: UnitOfWork> AssignmentService for AssignmentManager<U> {
    async fn set_employee_customers(
        &self,
        employee: &User,
        customer_ids: Vec<String>,
    ) -> AppResult<SyncOutcome> {
        if !employee.has_role(UserRole::Employee) {
            return Err(AppError::NotFound);
        }
        let employee_id = employee.id;
        let desired = self.resolve_customers(&customer_ids).await?;

        with_transaction!(self.uow, |ctx| {
            ctx.assignments()
                .sync_customers(employee_id, &desired)
                .await
        })
    }

    async fn customers_of(&self, employee_id: Uuid) -> AppResult<Vec<UserSummary>> {
        self.require(employee_id, UserRole::Employee).await?;
        self.uow.assignments().customers_of(employee_id).await
    }

    async fn employees_of(&self, customer_id: Uuid) -> AppResult<Vec<UserSummary>> {
        self.require(customer_id, UserRole::Customer).await?;
        self.uow.assignments().employees_of(customer_id).await
    }
}
