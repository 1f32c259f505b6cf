//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserChanges, UserRole, UserSummary};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find every user whose id is in `ids`
    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Replace profile fields of an existing user
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// All users with the role, sorted by name
    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>>;

    /// `{id, name, email}` of all users with the role, sorted by name
    async fn summaries_by_role(&self, role: UserRole) -> AppResult<Vec<UserSummary>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Report a unique-email violation raised by the store as a field error.
pub(crate) fn map_email_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::validation("email", "The email has already been taken")
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.as_str().to_string()),
            phone: Set(new_user.phone),
            hourly_rate: Set(new_user.hourly_rate),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(map_email_conflict)?;
        User::try_from(model)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(changes.name);
        active.email = Set(changes.email);
        active.phone = Set(changes.phone);
        active.hourly_rate = Set(changes.hourly_rate);
        if let Some(hash) = changes.password_hash {
            active.password_hash = Set(hash);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(map_email_conflict)?;
        User::try_from(model)
    }

    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .order_by_asc(user::Column::Name)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn summaries_by_role(&self, role: UserRole) -> AppResult<Vec<UserSummary>> {
        let models = UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .order_by_asc(user::Column::Name)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.iter().map(UserSummary::from).collect())
    }
}
