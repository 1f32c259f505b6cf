//! User service - employee and customer directory management.
//!
//! Every operation takes the role of the namespace it is called through;
//! a user of another role is treated as absent.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{NewUser, Password, User, UserChanges, UserInput, UserRole};
use crate::errors::{AppResult, FieldErrors, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// All users of the role, sorted by name
    async fn list(&self, role: UserRole) -> AppResult<Vec<User>>;

    async fn get(&self, role: UserRole, id: Uuid) -> AppResult<User>;

    async fn create(&self, role: UserRole, input: UserInput) -> AppResult<User>;

    /// Replace profile fields. An absent password keeps the stored one.
    async fn update(&self, role: UserRole, id: Uuid, input: UserInput) -> AppResult<User>;

    /// Hard delete together with the user's assignments and shifts
    async fn delete(&self, role: UserRole, id: Uuid) -> AppResult<()>;

    /// Bootstrap an administrator account
    async fn create_admin(&self, name: String, email: String, password: String) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Report a taken email unless it belongs to `owner`.
    async fn check_email_free(
        &self,
        email: &str,
        owner: Option<Uuid>,
        errors: &mut FieldErrors,
    ) -> AppResult<()> {
        if let Some(existing) = self.uow.users().find_by_email(email).await? {
            if Some(existing.id) != owner {
                errors.add("email", "The email has already been taken");
            }
        }
        Ok(())
    }
}

/// Validator rules plus the role-dependent password rules.
fn check_input(role: UserRole, input: &UserInput, creating: bool) -> FieldErrors {
    let mut errors = match input.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };

    match input.password() {
        Some(plain) => {
            errors.merge(Password::check_new(plain, input.password_confirmation.as_deref()));
        }
        None if creating && role == UserRole::Employee => {
            errors.add("password", "The password field is required");
        }
        None => {}
    }

    errors
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list(&self, role: UserRole) -> AppResult<Vec<User>> {
        self.uow.users().list_by_role(role).await
    }

    async fn get(&self, role: UserRole, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .filter(|u| u.has_role(role))
            .ok_or_not_found()
    }

    async fn create(&self, role: UserRole, input: UserInput) -> AppResult<User> {
        let mut errors = check_input(role, &input, true);
        let email = trimmed(&input.email);
        if !errors.contains("email") {
            self.check_email_free(&email, None, &mut errors).await?;
        }
        errors.into_result()?;

        let password = match input.password() {
            Some(plain) => Password::new(plain)?,
            None => Password::unusable()?,
        };

        let user = self
            .uow
            .users()
            .create(NewUser {
                name: trimmed(&input.name),
                email,
                password_hash: password.into_string(),
                role,
                phone: input.phone(),
                hourly_rate: input.hourly_rate.filter(|_| role == UserRole::Employee),
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %role, "user created");
        Ok(user)
    }

    async fn update(&self, role: UserRole, id: Uuid, input: UserInput) -> AppResult<User> {
        let existing = self.get(role, id).await?;

        let mut errors = check_input(role, &input, false);
        let email = trimmed(&input.email);
        if !errors.contains("email") {
            self.check_email_free(&email, Some(existing.id), &mut errors).await?;
        }
        errors.into_result()?;

        let password_hash = input
            .password()
            .map(Password::new)
            .transpose()?
            .map(Password::into_string);

        let user = self
            .uow
            .users()
            .update(
                existing.id,
                UserChanges {
                    name: trimmed(&input.name),
                    email,
                    password_hash,
                    phone: input.phone(),
                    hourly_rate: input.hourly_rate.filter(|_| role == UserRole::Employee),
                },
            )
            .await?;

        tracing::info!(user_id = %user.id, role = %role, "user updated");
        Ok(user)
    }

    async fn delete(&self, role: UserRole, id: Uuid) -> AppResult<()> {
        let id = self.get(role, id).await?.id;

        with_transaction!(self.uow, |ctx| ctx.users().delete_cascading(id).await)
    }

    async fn create_admin(&self, name: String, email: String, password: String) -> AppResult<User> {
        let input = UserInput {
            name: Some(name),
            email: Some(email),
            password_confirmation: Some(password.clone()),
            password: Some(password),
            ..Default::default()
        };

        let mut errors = check_input(UserRole::Admin, &input, true);
        if input.password().is_none() {
            errors.add("password", "The password field is required");
        }
        let email = trimmed(&input.email);
        if !errors.contains("email") {
            self.check_email_free(&email, None, &mut errors).await?;
        }
        errors.into_result()?;

        let password = Password::new(input.password().unwrap_or_default())?;
        let user = self
            .uow
            .users()
            .create(NewUser {
                name: trimmed(&input.name),
                email,
                password_hash: password.into_string(),
                role: UserRole::Admin,
                phone: None,
                hourly_rate: None,
            })
            .await?;

        tracing::info!(user_id = %user.id, "admin created");
        Ok(user)
    }
}
