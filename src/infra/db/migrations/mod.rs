//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250901_000001_create_users_table;
mod m20250926_000001_create_customer_employee_table;
mod m20250926_000002_create_shifts_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_users_table::Migration),
            Box::new(m20250926_000001_create_customer_employee_table::Migration),
            Box::new(m20250926_000002_create_shifts_table::Migration),
        ]
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Phone,
    HourlyRate,
    CreatedAt,
    UpdatedAt,
}
