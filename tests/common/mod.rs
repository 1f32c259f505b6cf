//! Shared fixtures: an in-memory SQLite database with the schema applied.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use shiftdesk::config::Config;
use shiftdesk::domain::{NewUser, ServiceKind, Shift, ShiftDraft, ShiftStatus, User, UserRole};
use shiftdesk::infra::{
    Database, Migrator, Persistence, ShiftRepository, ShiftStore, UserRepository, UserStore,
};
use shiftdesk::services::Claims;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// One pooled connection, so every query sees the same in-memory database.
pub async fn connect() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = SeaDatabase::connect(opts).await.expect("sqlite connection");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub fn config() -> Config {
    Config::new("sqlite::memory:", JWT_SECRET)
}

pub fn uow(db: &DatabaseConnection) -> Arc<Persistence> {
    Arc::new(Persistence::new(db.clone()))
}

pub fn database(db: &DatabaseConnection) -> Arc<Database> {
    Arc::new(Database::from_connection(db.clone()))
}

/// Insert a user without paying for password hashing.
pub async fn seed_user(db: &DatabaseConnection, role: UserRole, name: &str) -> User {
    UserStore::new(db.clone())
        .create(NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            password_hash: "not-a-real-hash".to_string(),
            role,
            phone: None,
            hourly_rate: None,
        })
        .await
        .expect("seed user")
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn at(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

pub async fn seed_shift(
    db: &DatabaseConnection,
    date: &str,
    start: &str,
    end: &str,
    customer: &User,
    employee: &User,
    status: ShiftStatus,
) -> Shift {
    seed_service_shift(db, ServiceKind::Massor, date, start, end, customer, employee, status).await
}

#[allow(clippy::too_many_arguments)]
pub async fn seed_service_shift(
    db: &DatabaseConnection,
    service: ServiceKind,
    date: &str,
    start: &str,
    end: &str,
    customer: &User,
    employee: &User,
    status: ShiftStatus,
) -> Shift {
    ShiftStore::new(db.clone())
        .create(ShiftDraft {
            date: day(date),
            start_time: at(start),
            end_time: at(end),
            service,
            status,
            customer_id: customer.id,
            employee_id: employee.id,
        })
        .await
        .expect("seed shift")
}

/// Bearer token for the user, signed like the login endpoint does.
pub fn token_for(user: &User) -> String {
    token_with_role(user, user.role.as_str())
}

pub fn token_with_role(user: &User, role: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: role.to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token")
}
