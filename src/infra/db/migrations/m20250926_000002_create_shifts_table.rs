//! Migration: create the shifts table.

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
                    .table(Shifts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Shifts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Shifts::Date).date().not_null())
                    .col(ColumnDef::new(Shifts::StartTime).time().not_null())
                    .col(ColumnDef::new(Shifts::EndTime).time().not_null())
                    .col(ColumnDef::new(Shifts::Service).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Shifts::Status)
                            .string_len(16)
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(Shifts::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Shifts::EmployeeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Shifts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Shifts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shifts_customer")
                            .from(Shifts::Table, Shifts::CustomerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shifts_employee")
                            .from(Shifts::Table, Shifts::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shifts_date")
                    .table(Shifts::Table)
                    .col(Shifts::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Shifts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Shifts {
    Table,
    Id,
    Date,
    StartTime,
    EndTime,
    Service,
    Status,
    CustomerId,
    EmployeeId,
    CreatedAt,
    UpdatedAt,
}
