//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserRole, UserSummary};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub hourly_rate: Option<Decimal>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role: UserRole = model
            .role
            .parse()
            .map_err(|e| AppError::internal(format!("user {}: {}", model.id, e)))?;

        Ok(User {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role,
            phone: model.phone,
            hourly_rate: model.hourly_rate,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Model> for UserSummary {
    fn from(model: &Model) -> Self {
        UserSummary {
            id: model.id,
            name: model.name.clone(),
            email: model.email.clone(),
        }
    }
}
