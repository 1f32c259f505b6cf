//! Migration: create the employee ↔ customer join table.

use sea_orm_migration::prelude::*;

use super::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerEmployee::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CustomerEmployee::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(CustomerEmployee::CustomerId).uuid().not_null())
                    .col(
                        ColumnDef::new(CustomerEmployee::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CustomerEmployee::EmployeeId)
                            .col(CustomerEmployee::CustomerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_employee_employee")
                            .from(CustomerEmployee::Table, CustomerEmployee::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_employee_customer")
                            .from(CustomerEmployee::Table, CustomerEmployee::CustomerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookups (customer -> employees)
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_employee_customer")
                    .table(CustomerEmployee::Table)
                    .col(CustomerEmployee::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerEmployee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CustomerEmployee {
    Table,
    EmployeeId,
    CustomerId,
    CreatedAt,
}
