//! Create user_activities table migration

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserActivities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserActivities::UserId).string().not_null())
                    .col(ColumnDef::new(UserActivities::LoginDate).date().not_null())
                    .col(ColumnDef::new(UserActivities::StartTime).time().not_null())
                    .col(ColumnDef::new(UserActivities::EndTime).time().null())
                    .col(
                        ColumnDef::new(UserActivities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_activities_user")
                            .from(UserActivities::Table, UserActivities::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_activities_user_date")
                    .table(UserActivities::Table)
                    .col(UserActivities::UserId)
                    .col(UserActivities::LoginDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserActivities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserActivities {
    Table,
    Id,
    UserId,
    LoginDate,
    StartTime,
    EndTime,
    CreatedAt,
}
