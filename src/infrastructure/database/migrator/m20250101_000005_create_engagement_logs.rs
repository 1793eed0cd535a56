//! Create search_products, wishlists and attachment_download_logs tables

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;
use super::m20250101_000003_create_catalog::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchProducts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchProducts::UserId).string().null())
                    .col(ColumnDef::new(SearchProducts::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(SearchProducts::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SearchProducts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SearchProducts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_search_products_user")
                            .from(SearchProducts::Table, SearchProducts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_search_products_product")
                            .from(SearchProducts::Table, SearchProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_products_date")
                    .table(SearchProducts::Table)
                    .col(SearchProducts::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Wishlists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wishlists::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wishlists::UserId).string().not_null())
                    .col(ColumnDef::new(Wishlists::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(Wishlists::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Wishlists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wishlists::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlists_user")
                            .from(Wishlists::Table, Wishlists::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlists_product")
                            .from(Wishlists::Table, Wishlists::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AttachmentDownloadLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttachmentDownloadLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AttachmentDownloadLogs::UserId).string().null())
                    .col(
                        ColumnDef::new(AttachmentDownloadLogs::ProductId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttachmentDownloadLogs::FileName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttachmentDownloadLogs::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_download_logs_user")
                            .from(AttachmentDownloadLogs::Table, AttachmentDownloadLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_download_logs_product")
                            .from(
                                AttachmentDownloadLogs::Table,
                                AttachmentDownloadLogs::ProductId,
                            )
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttachmentDownloadLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wishlists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SearchProducts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum SearchProducts {
    Table,
    Id,
    UserId,
    ProductId,
    Date,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Wishlists {
    Table,
    Id,
    UserId,
    ProductId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum AttachmentDownloadLogs {
    Table,
    Id,
    UserId,
    ProductId,
    FileName,
    Date,
}
