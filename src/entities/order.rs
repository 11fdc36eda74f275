use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub customer_id: i64,
    pub order_date: DateTimeUtc,
    pub note: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_original_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_sales_revenue: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub additional_cost: Decimal,
    pub additional_cost_note: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((7, 4)))")]
    pub tax_percent: Decimal,
    pub created_by: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    #[sea_orm(has_many = "super::order_image::Entity")]
    OrderImages,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::order_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderImages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
