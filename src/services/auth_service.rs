//! Authentication service - password login and bearer token verification.
//!
//! Accounts are created by admins (or the `create-admin` command); there is
//! no self-registration.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Argon2 hash verified when the email is unknown, so both failure paths
/// cost the same.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$3k3U2lGtYkqXn8X3n6mQm3oO8n2cW3v9s9Jv2JQm0nE";

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Sign a token for the user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Decode and validate a token
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(&email).await?;

        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_string());
        let password_valid = Password::from_hash(hash).verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
                generate_token(&user, &self.config)
            }
            _ => {
                tracing::warn!("login failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
