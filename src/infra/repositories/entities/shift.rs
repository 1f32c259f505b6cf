//! Shift database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{ServiceKind, Shift, ShiftStatus};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shifts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub service: String,
    pub status: String,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CustomerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::EmployeeId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Shift {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let service: ServiceKind = model
            .service
            .parse()
            .map_err(|e| AppError::internal(format!("shift {}: {}", model.id, e)))?;
        let status: ShiftStatus = model
            .status
            .parse()
            .map_err(|e| AppError::internal(format!("shift {}: {}", model.id, e)))?;

        Ok(Shift {
            id: model.id,
            date: model.date,
            start_time: model.start_time,
            end_time: model.end_time,
            service,
            status,
            customer_id: model.customer_id,
            employee_id: model.employee_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
