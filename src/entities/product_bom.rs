use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One edge of the BOM graph: producing one unit of the parent consumes
/// `quantity` units of the component.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_boms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub parent_product_id: i64,
    pub component_product_id: i64,
    #[sea_orm(column_type = "Decimal(Some((19, 6)))")]
    pub quantity: Decimal,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ParentProductId",
        to = "super::product::Column::Id"
    )]
    Parent,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ComponentProductId",
        to = "super::product::Column::Id"
    )]
    Component,
}

impl ActiveModelBehavior for ActiveModel {}
