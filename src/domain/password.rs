//! Password value object - argon2 hashing for user credentials.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult, FieldErrors};

/// Hashed password credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password.
    ///
    /// # Errors
    /// Returns a validation error on the `password` field if it is too short.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        Self::check_strength(plain_text).into_result()?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Credential nobody knows, for accounts created without a password.
    pub fn unusable() -> AppResult<Self> {
        let secret = format!("{}{}", Uuid::new_v4(), Uuid::new_v4());
        Ok(Self {
            hash: Self::hash(&secret)?,
        })
    }

    /// Length and confirmation rules for a new password.
    pub fn check_new(plain_text: &str, confirmation: Option<&str>) -> FieldErrors {
        let mut errors = Self::check_strength(plain_text);
        if confirmation != Some(plain_text) {
            errors.add("password", "The password confirmation does not match");
        }
        errors
    }

    fn check_strength(plain_text: &str) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if (plain_text.chars().count() as u64) < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            );
        }
        errors
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("massage-room-4").unwrap();

        assert!(password.verify("massage-room-4"));
        assert!(!password.verify("massage-room-5"));
    }

    #[test]
    fn test_restored_hash_still_verifies() {
        let hash = Password::new("TestPassword123").unwrap().into_string();
        assert!(Password::from_hash(hash).verify("TestPassword123"));
    }

    #[test]
    fn test_short_password_is_a_field_error() {
        let err = Password::new("short").unwrap_err();
        let fields = err.field_errors().expect("validation error");
        assert!(fields.contains("password"));
    }

    #[test]
    fn test_confirmation_must_match() {
        assert!(Password::check_new("longenough", Some("longenough")).is_empty());
        assert!(Password::check_new("longenough", Some("different")).contains("password"));
        assert!(Password::check_new("longenough", None).contains("password"));
    }

    #[test]
    fn test_unusable_password_rejects_guesses() {
        let password = Password::unusable().unwrap();
        assert!(!password.verify("password"));
        assert!(!password.verify(""));
    }
}
