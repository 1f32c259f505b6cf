//! Shift repository implementation.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::shift::{self, ActiveModel, Entity as ShiftEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{Shift, ShiftDraft, ShiftFilters, ShiftRecord, UserSummary};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ShiftRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Shift>>;

    /// Shifts matching every given filter, newest date first, with their parties.
    async fn list_with_parties(&self, filters: &ShiftFilters) -> AppResult<Vec<ShiftRecord>>;

    async fn create(&self, draft: ShiftDraft) -> AppResult<Shift>;

    async fn update(&self, id: Uuid, draft: ShiftDraft) -> AppResult<Shift>;

    /// Hard delete
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ShiftStore {
    db: DatabaseConnection,
}

impl ShiftStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Translate normalized filters into a SQL condition.
fn condition(filters: &ShiftFilters) -> Condition {
    let mut cond = Condition::all();

    cond = match (filters.date_from, filters.date_to) {
        (Some(from), Some(to)) => cond.add(shift::Column::Date.between(from, to)),
        (Some(from), None) => cond.add(shift::Column::Date.gte(from)),
        (None, Some(to)) => cond.add(shift::Column::Date.lte(to)),
        (None, None) => cond,
    };
    if let Some(service) = filters.service {
        cond = cond.add(shift::Column::Service.eq(service.as_str()));
    }
    if let Some(status) = filters.status {
        cond = cond.add(shift::Column::Status.eq(status.as_str()));
    }
    if let Some(customer_id) = filters.customer_id {
        cond = cond.add(shift::Column::CustomerId.eq(customer_id));
    }
    if let Some(employee_id) = filters.employee_id {
        cond = cond.add(shift::Column::EmployeeId.eq(employee_id));
    }

    cond
}

fn apply(active: &mut ActiveModel, draft: ShiftDraft) {
    active.date = Set(draft.date);
    active.start_time = Set(draft.start_time);
    active.end_time = Set(draft.end_time);
    active.service = Set(draft.service.as_str().to_string());
    active.status = Set(draft.status.as_str().to_string());
    active.customer_id = Set(draft.customer_id);
    active.employee_id = Set(draft.employee_id);
    active.updated_at = Set(chrono::Utc::now());
}

#[async_trait]
impl ShiftRepository for ShiftStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Shift>> {
        ShiftEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Shift::try_from)
            .transpose()
    }

    async fn list_with_parties(&self, filters: &ShiftFilters) -> AppResult<Vec<ShiftRecord>> {
        tracing::debug!(?filters, "listing shifts");

        let shifts = ShiftEntity::find()
            .filter(condition(filters))
            .order_by_desc(shift::Column::Date)
            .order_by_desc(shift::Column::StartTime)
            .order_by_asc(shift::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Shift::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        // Load both parties of every row in one query
        let party_ids: BTreeSet<Uuid> = shifts
            .iter()
            .flat_map(|s| [s.customer_id, s.employee_id])
            .collect();
        let parties: HashMap<Uuid, UserSummary> = if party_ids.is_empty() {
            HashMap::new()
        } else {
            UserEntity::find()
                .filter(user::Column::Id.is_in(party_ids))
                .all(&self.db)
                .await?
                .iter()
                .map(|m| (m.id, UserSummary::from(m)))
                .collect()
        };

        Ok(shifts
            .iter()
            .map(|s| {
                ShiftRecord::project(
                    s,
                    parties.get(&s.customer_id).cloned(),
                    parties.get(&s.employee_id).cloned(),
                )
            })
            .collect())
    }

    async fn create(&self, draft: ShiftDraft) -> AppResult<Shift> {
        let now = chrono::Utc::now();
        let mut active = ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            ..Default::default()
        };
        apply(&mut active, draft);

        let model = active.insert(&self.db).await?;
        Shift::try_from(model)
    }

    async fn update(&self, id: Uuid, draft: ShiftDraft) -> AppResult<Shift> {
        let existing = ShiftEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        apply(&mut active, draft);

        let model = active.update(&self.db).await?;
        Shift::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ShiftEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;
    use crate::domain::{ServiceKind, ShiftStatus};

    fn sql(filters: &ShiftFilters) -> String {
        ShiftEntity::find()
            .filter(condition(filters))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_no_filters_means_no_column_predicates() {
        let query = sql(&ShiftFilters::default());
        let predicate = query.split(" WHERE ").nth(1).unwrap_or("TRUE");
        assert_eq!(predicate.trim(), "TRUE", "{}", query);
    }

    #[test]
    fn test_range_uses_between() {
        let filters = ShiftFilters {
            date_from: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
            date_to: chrono::NaiveDate::from_ymd_opt(2025, 1, 31),
            ..Default::default()
        };
        let query = sql(&filters);
        assert!(query.contains("\"date\" BETWEEN '2025-01-01' AND '2025-01-31'"), "{}", query);
    }

    #[test]
    fn test_open_ended_bounds() {
        let from_only = sql(&ShiftFilters {
            date_from: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
            ..Default::default()
        });
        assert!(from_only.contains("\"date\" >= '2025-01-01'"), "{}", from_only);

        let to_only = sql(&ShiftFilters {
            date_to: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
            ..Default::default()
        });
        assert!(to_only.contains("\"date\" <= '2025-01-01'"), "{}", to_only);
    }

    #[test]
    fn test_exact_matches_are_conjunctive() {
        let query = sql(&ShiftFilters {
            service: Some(ServiceKind::Hudterapeut),
            status: Some(ShiftStatus::Canceled),
            ..Default::default()
        });
        assert!(query.contains("\"service\" = 'Hudterapeut'"), "{}", query);
        assert!(query.contains(" AND "), "{}", query);
        assert!(query.contains("\"status\" = 'canceled'"), "{}", query);
    }
}
