//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::config::{ROLE_ADMIN, ROLE_CUSTOMER, ROLE_EMPLOYEE};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Employee,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Employee => ROLE_EMPLOYEE,
            UserRole::Customer => ROLE_CUSTOMER,
        }
    }

    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Whether shift listings for this role include the customer dropdown.
    pub fn sees_customer_directory(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Employee)
    }

    /// Whether shift listings for this role include the employee dropdown.
    pub fn sees_employee_directory(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Customer)
    }
}

/// Unknown role tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_EMPLOYEE => Ok(UserRole::Employee),
            ROLE_CUSTOMER => Ok(UserRole::Customer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Fields for inserting a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub hourly_rate: Option<Decimal>,
}

/// Replacement profile fields for an existing user.
///
/// `password_hash` of `None` keeps the stored credential.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub hourly_rate: Option<Decimal>,
}

/// Create/update payload for employees and customers.
///
/// Password rules depend on the role and the operation and are checked by
/// the user service.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[validate(
        required(message = "The name field is required"),
        length(min = 1, max = 255, message = "The name must be between 1 and 255 characters")
    )]
    #[schema(example = "Anna Lind")]
    pub name: Option<String>,
    #[validate(
        required(message = "The email field is required"),
        email(message = "The email must be a valid email address")
    )]
    #[schema(example = "anna@example.com")]
    pub email: Option<String>,
    #[validate(length(max = 20, message = "The phone may not be greater than 20 characters"))]
    pub phone: Option<String>,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = Option<String>, example = "350.00")]
    pub hourly_rate: Option<Decimal>,
    #[schema(min_length = 8)]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

fn non_negative(rate: &Decimal) -> Result<(), ValidationError> {
    if rate.is_sign_negative() && !rate.is_zero() {
        let mut err = ValidationError::new("min");
        err.message = Some("The hourly rate must be at least 0".into());
        return Err(err);
    }
    Ok(())
}

impl UserInput {
    /// Optional text field with blanks treated as absent.
    pub fn phone(&self) -> Option<String> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }

    /// Password with an empty string treated as absent.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Minimal user projection used in shift rows and dropdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    #[schema(example = "Anna Lind")]
    pub name: String,
    #[schema(example = "anna@example.com")]
    pub email: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Display name
    #[schema(example = "Anna Lind")]
    pub name: String,
    /// Email address
    #[schema(example = "anna@example.com")]
    pub email: String,
    /// Role tag
    pub role: UserRole,
    #[schema(example = "+46 70 123 45 67")]
    pub phone: Option<String>,
    /// Hourly rate (employees only)
    #[schema(value_type = Option<String>, example = "350.00")]
    pub hourly_rate: Option<Decimal>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            phone: user.phone,
            hourly_rate: user.hourly_rate,
            created_at: user.created_at,
        }
    }
}
