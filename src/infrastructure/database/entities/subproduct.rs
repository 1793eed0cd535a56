//! Subproduct entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subproducts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Cleared when the parent product is deleted
    #[sea_orm(nullable)]
    pub product_id: Option<i32>,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub unit: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "SetNull"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
