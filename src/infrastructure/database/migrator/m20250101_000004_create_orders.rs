//! Create regions and order_product_online tables

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
                    .table(Regions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Regions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Regions::CountryCode)
                            .string_len(2)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Regions::CountryName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Regions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Regions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderProductOnline::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderProductOnline::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderProductOnline::RegionId).integer().not_null())
                    .col(ColumnDef::new(OrderProductOnline::UserId).string().not_null())
                    .col(ColumnDef::new(OrderProductOnline::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(OrderProductOnline::Status)
                            .string_len(10)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(OrderProductOnline::OrderDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderProductOnline::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderProductOnline::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_region")
                            .from(OrderProductOnline::Table, OrderProductOnline::RegionId)
                            .to(Regions::Table, Regions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user")
                            .from(OrderProductOnline::Table, OrderProductOnline::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_product")
                            .from(OrderProductOnline::Table, OrderProductOnline::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_order_date")
                    .table(OrderProductOnline::Table)
                    .col(OrderProductOnline::OrderDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderProductOnline::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Regions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Regions {
    Table,
    Id,
    CountryCode,
    CountryName,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum OrderProductOnline {
    Table,
    Id,
    RegionId,
    UserId,
    ProductId,
    Status,
    OrderDate,
    CreatedAt,
    UpdatedAt,
}
