//! Support / demo / training request log entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "request_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(nullable)]
    pub user_id: Option<String>,

    pub product_id: i32,

    pub request_type_id: i32,

    /// Free-text subject, e.g. the reported issue
    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,

    pub date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::request_type::Entity",
        from = "Column::RequestTypeId",
        to = "super::request_type::Column::Id",
        on_delete = "Restrict"
    )]
    RequestType,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::request_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequestType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
