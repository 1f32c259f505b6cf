//! Shift service - role-scoped listing and admin CRUD.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Actor, EffectiveFilters, RawShiftFilters, Shift, ShiftDraft, ShiftFilters, ShiftInput,
    ShiftRecord, User, UserRole, UserSummary,
};
use crate::errors::{AppResult, FieldErrors, OptionExt};
use crate::infra::UnitOfWork;

/// Everything the shift overview needs in one payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShiftListing {
    pub shifts: Vec<ShiftRecord>,
    /// Customer dropdown; empty for customers
    pub customers: Vec<UserSummary>,
    /// Employee dropdown; empty for employees
    pub employees: Vec<UserSummary>,
    pub filters: EffectiveFilters,
}

#[async_trait]
pub trait ShiftService: Send + Sync {
    /// Shifts visible to the actor that match the filters.
    async fn list_shifts(&self, actor: &Actor, raw: RawShiftFilters) -> AppResult<ShiftListing>;

    async fn find_shift(&self, id: Uuid) -> AppResult<Shift>;

    async fn create_shift(&self, input: ShiftInput) -> AppResult<ShiftRecord>;

    /// Replace every field of an already loaded shift
    async fn update_shift(&self, existing: &Shift, input: ShiftInput) -> AppResult<ShiftRecord>;

    async fn delete_shift(&self, id: Uuid) -> AppResult<()>;
}

pub struct ShiftManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ShiftManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn users_by_id(&self, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, User>> {
        Ok(self
            .uow
            .users()
            .find_many(ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect())
    }

    /// Filter ids must name an existing user of any role.
    async fn check_filter_parties(&self, filters: &ShiftFilters) -> AppResult<()> {
        let refs = filters.referenced_users();
        if refs.is_empty() {
            return Ok(());
        }

        let known = self
            .users_by_id(refs.iter().map(|(_, id)| *id).collect())
            .await?;
        let mut errors = FieldErrors::new();
        for (field, id) in refs {
            if !known.contains_key(&id) {
                errors.add(field, format!("The selected {} is invalid", field));
            }
        }
        errors.into_result()
    }

    /// Validate the payload and resolve both parties with their roles.
    async fn resolve(&self, input: &ShiftInput) -> AppResult<(ShiftDraft, UserSummary, UserSummary)> {
        let draft = input.validate()?;

        let users = self
            .users_by_id(vec![draft.customer_id, draft.employee_id])
            .await?;
        let party = |id: Uuid, role: UserRole| {
            users.get(&id).filter(|u| u.has_role(role)).map(User::summary)
        };
        let customer = party(draft.customer_id, UserRole::Customer);
        let employee = party(draft.employee_id, UserRole::Employee);

        let mut errors = FieldErrors::new();
        if customer.is_none() {
            errors.add("customer_id", "The selected customer_id is not a customer");
        }
        if employee.is_none() {
            errors.add("employee_id", "The selected employee_id is not an employee");
        }

        match (customer, employee) {
            (Some(customer), Some(employee)) => Ok((draft, customer, employee)),
            _ => Err(errors.into()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> ShiftService for ShiftManager<U> {
    async fn list_shifts(&self, actor: &Actor, raw: RawShiftFilters) -> AppResult<ShiftListing> {
        let filters = ShiftFilters::from_raw(&raw)?;
        self.check_filter_parties(&filters).await?;
        let filters = filters.scoped_for(actor);

        let users = self.uow.users();
        let store = self.uow.shifts();
        let customers = async {
            if actor.role.sees_customer_directory() {
                users.summaries_by_role(UserRole::Customer).await
            } else {
                Ok(Vec::new())
            }
        };
        let employees = async {
            if actor.role.sees_employee_directory() {
                users.summaries_by_role(UserRole::Employee).await
            } else {
                Ok(Vec::new())
            }
        };
        let (shifts, customers, employees) = tokio::try_join!(
            store.list_with_parties(&filters),
            customers,
            employees
        )?;

        tracing::debug!(actor = %actor.id, role = %actor.role, count = shifts.len(), "shifts listed");

        Ok(ShiftListing {
            shifts,
            customers,
            employees,
            filters: EffectiveFilters::from(&filters),
        })
    }

    async fn find_shift(&self, id: Uuid) -> AppResult<Shift> {
        self.uow.shifts().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_shift(&self, input: ShiftInput) -> AppResult<ShiftRecord> {
        let (draft, customer, employee) = self.resolve(&input).await?;
        let shift = self.uow.shifts().create(draft).await?;

        tracing::info!(shift_id = %shift.id, date = %shift.date, "shift created");
        Ok(ShiftRecord::project(&shift, Some(customer), Some(employee)))
    }

    async fn update_shift(&self, existing: &Shift, input: ShiftInput) -> AppResult<ShiftRecord> {
        let (draft, customer, employee) = self.resolve(&input).await?;
        let shift = self.uow.shifts().update(existing.id, draft).await?;

        tracing::info!(shift_id = %shift.id, "shift updated");
        Ok(ShiftRecord::project(&shift, Some(customer), Some(employee)))
    }

    async fn delete_shift(&self, id: Uuid) -> AppResult<()> {
        self.uow.shifts().delete(id).await?;
        tracing::info!(shift_id = %id, "shift deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceKind, ShiftStatus};
    use crate::infra::{MockAssignmentRepository, MockShiftRepository, MockUserRepository};
    use crate::services::testing::{user, MockUow};

    fn payload(customer: &User, employee: &User) -> ShiftInput {
        ShiftInput {
            date: Some("2025-01-10".to_string()),
            start_time: Some("09:00".to_string()),
            end_time: Some("10:30".to_string()),
            service: Some("Massor".to_string()),
            customer_id: Some(customer.id.to_string()),
            employee_id: Some(employee.id.to_string()),
            status: None,
        }
    }

    fn stored(d: ShiftDraft) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            date: d.date,
            start_time: d.start_time,
            end_time: d.end_time,
            service: d.service,
            status: d.status,
            customer_id: d.customer_id,
            employee_id: d.employee_id,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn service(users: MockUserRepository, shifts: MockShiftRepository) -> ShiftManager<MockUow> {
        ShiftManager::new(MockUow::new(users, shifts, MockAssignmentRepository::new()))
    }

    #[tokio::test]
    async fn test_customer_listing_is_scoped_and_hides_customer_dropdown() {
        let customer = user(UserRole::Customer, "Carl");
        let actor = Actor::new(customer.id, UserRole::Customer);
        let someone = user(UserRole::Customer, "Other");
        let someone_id = someone.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_many()
            .returning(move |_| Ok(vec![someone.clone()]));
        users
            .expect_summaries_by_role()
            .withf(|role| *role == UserRole::Employee)
            .times(1)
            .returning(|_| Ok(vec![user(UserRole::Employee, "Anna").summary()]));

        let mut shifts = MockShiftRepository::new();
        shifts
            .expect_list_with_parties()
            .withf(move |f| f.customer_id == Some(actor.id) && f.employee_id.is_none())
            .times(1)
            .returning(|_| Ok(vec![]));

        let raw = RawShiftFilters {
            customer_id: Some(someone_id.to_string()),
            ..Default::default()
        };
        let listing = service(users, shifts).list_shifts(&actor, raw).await.unwrap();

        assert!(listing.customers.is_empty());
        assert_eq!(listing.employees.len(), 1);
        assert_eq!(listing.filters.customer_id, actor.id.to_string());
        assert_eq!(listing.filters.employee_id, "");
    }

    #[tokio::test]
    async fn test_unknown_filter_party_is_rejected() {
        let admin = Actor::new(Uuid::new_v4(), UserRole::Admin);

        let mut users = MockUserRepository::new();
        users.expect_find_many().returning(|_| Ok(vec![]));
        let mut shifts = MockShiftRepository::new();
        shifts.expect_list_with_parties().never();

        let raw = RawShiftFilters {
            employee_id: Some(Uuid::new_v4().to_string()),
            ..Default::default()
        };
        let err = service(users, shifts)
            .list_shifts(&admin, raw)
            .await
            .unwrap_err();

        assert!(err.field_errors().unwrap().contains("employee_id"));
    }

    #[tokio::test]
    async fn test_create_requires_role_correct_parties() {
        let customer = user(UserRole::Customer, "Carl");
        let not_an_employee = user(UserRole::Customer, "Dora");
        let input = payload(&customer, &not_an_employee);

        let mut users = MockUserRepository::new();
        users
            .expect_find_many()
            .returning(move |_| Ok(vec![customer.clone(), not_an_employee.clone()]));
        let mut shifts = MockShiftRepository::new();
        shifts.expect_create().never();

        let err = service(users, shifts).create_shift(input).await.unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.contains("employee_id"));
        assert!(!fields.contains("customer_id"));
    }

    #[tokio::test]
    async fn test_create_projects_parties() {
        let customer = user(UserRole::Customer, "Carl");
        let employee = user(UserRole::Employee, "Anna");
        let input = payload(&customer, &employee);
        let (c, e) = (customer.clone(), employee.clone());

        let mut users = MockUserRepository::new();
        users
            .expect_find_many()
            .returning(move |_| Ok(vec![c.clone(), e.clone()]));
        let mut shifts = MockShiftRepository::new();
        shifts
            .expect_create()
            .withf(|d| d.status == ShiftStatus::Open && d.service == ServiceKind::Massor)
            .returning(|d| Ok(stored(d)));

        let record = service(users, shifts).create_shift(input).await.unwrap();

        assert_eq!(record.start_time, "09:00");
        assert_eq!(record.customer, Some(customer.summary()));
        assert_eq!(record.employee, Some(employee.summary()));
    }

    #[tokio::test]
    async fn test_update_writes_loaded_shift_without_refetching() {
        let customer = user(UserRole::Customer, "Carl");
        let employee = user(UserRole::Employee, "Anna");
        let mut input = payload(&customer, &employee);
        input.status = Some("cancel".to_string());
        let (c, e) = (customer.clone(), employee.clone());
        let existing = stored(ShiftDraft {
            date: chrono::NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(),
            start_time: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            service: ServiceKind::Hudterapeut,
            status: ShiftStatus::Open,
            customer_id: customer.id,
            employee_id: employee.id,
        });
        let id = existing.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_many()
            .returning(move |_| Ok(vec![c.clone(), e.clone()]));
        let mut shifts = MockShiftRepository::new();
        shifts.expect_find_by_id().never();
        shifts
            .expect_update()
            .withf(move |sid, d| *sid == id && d.status == ShiftStatus::Canceled)
            .times(1)
            .returning(|sid, d| Ok(Shift { id: sid, ..stored(d) }));

        let record = service(users, shifts)
            .update_shift(&existing, input)
            .await
            .unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.status, ShiftStatus::Canceled);
        assert_eq!(record.date.as_deref(), Some("2025-01-10"));
    }
}
