//! Create request_types and request_logs tables, seeding the request types
//! the support metrics count.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;
use super::m20250101_000003_create_catalog::Products;

const SEEDED_REQUEST_TYPES: [&str; 3] = ["Demo", "Training", "Support"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RequestTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequestTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RequestTypes::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RequestLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RequestLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RequestLogs::UserId).string().null())
                    .col(ColumnDef::new(RequestLogs::ProductId).integer().not_null())
                    .col(ColumnDef::new(RequestLogs::RequestTypeId).integer().not_null())
                    .col(ColumnDef::new(RequestLogs::Name).string_len(255).not_null())
                    .col(ColumnDef::new(RequestLogs::Message).text().null())
                    .col(
                        ColumnDef::new(RequestLogs::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_logs_user")
                            .from(RequestLogs::Table, RequestLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_logs_product")
                            .from(RequestLogs::Table, RequestLogs::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_logs_type")
                            .from(RequestLogs::Table, RequestLogs::RequestTypeId)
                            .to(RequestTypes::Table, RequestTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_request_logs_type_date")
                    .table(RequestLogs::Table)
                    .col(RequestLogs::RequestTypeId)
                    .col(RequestLogs::Date)
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(RequestTypes::Table).columns([RequestTypes::Name]);
        for name in SEEDED_REQUEST_TYPES {
            seed.values([name.into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }
        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequestLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RequestTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RequestTypes {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum RequestLogs {
    Table,
    Id,
    UserId,
    ProductId,
    RequestTypeId,
    Name,
    Message,
    Date,
}
