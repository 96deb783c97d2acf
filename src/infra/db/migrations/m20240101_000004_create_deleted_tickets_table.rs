//! Migration: Create the deleted-ticket archive.
//!
//! Deliberately without foreign keys so snapshots survive later user deletion.

use sea_orm_migration::prelude::*;

use crate::config::{VALID_PRIORITIES, VALID_STATUSES};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeletedTickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeletedTickets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DeletedTickets::OriginalId).integer().not_null())
                    .col(ColumnDef::new(DeletedTickets::OriginalUserId).integer().not_null())
                    .col(
                        ColumnDef::new(DeletedTickets::OriginalUserName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DeletedTickets::Title).string_len(255).not_null())
                    .col(ColumnDef::new(DeletedTickets::Description).text().not_null())
                    .col(
                        ColumnDef::new(DeletedTickets::Priority)
                            .string_len(10)
                            .not_null()
                            .check(
                                Expr::col(DeletedTickets::Priority)
                                    .is_in(VALID_PRIORITIES.iter().copied()),
                            ),
                    )
                    .col(
                        ColumnDef::new(DeletedTickets::Status)
                            .string_len(20)
                            .not_null()
                            .check(
                                Expr::col(DeletedTickets::Status)
                                    .is_in(VALID_STATUSES.iter().copied()),
                            ),
                    )
                    .col(
                        ColumnDef::new(DeletedTickets::DeletedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_deleted_tickets_deleted_at")
                    .table(DeletedTickets::Table)
                    .col(DeletedTickets::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeletedTickets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DeletedTickets {
    Table,
    Id,
    OriginalId,
    OriginalUserId,
    OriginalUserName,
    Title,
    Description,
    Priority,
    Status,
    DeletedAt,
}
