use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::product_bom::{self, Entity as ProductBom};
use crate::errors::{storage_error, ServiceError};

/// Persistent parent → component edges.
pub struct BomRepository;

impl BomRepository {
    /// Components of `parent_id`; empty for a leaf product.
    pub async fn components<C: ConnectionTrait>(
        conn: &C,
        parent_id: i64,
    ) -> Result<Vec<product_bom::Model>, ServiceError> {
        ProductBom::find()
            .filter(product_bom::Column::ParentProductId.eq(parent_id))
            .order_by_asc(product_bom::Column::ComponentProductId)
            .all(conn)
            .await
            .map_err(storage_error("bom.components"))
    }

    /// Edges in which `component_id` is consumed.
    pub async fn usages<C: ConnectionTrait>(
        conn: &C,
        component_id: i64,
    ) -> Result<Vec<product_bom::Model>, ServiceError> {
        ProductBom::find()
            .filter(product_bom::Column::ComponentProductId.eq(component_id))
            .order_by_asc(product_bom::Column::ParentProductId)
            .all(conn)
            .await
            .map_err(storage_error("bom.usages"))
    }

    pub async fn all<C: ConnectionTrait>(conn: &C) -> Result<Vec<product_bom::Model>, ServiceError> {
        ProductBom::find()
            .order_by_asc(product_bom::Column::ParentProductId)
            .order_by_asc(product_bom::Column::ComponentProductId)
            .all(conn)
            .await
            .map_err(storage_error("bom.all"))
    }

    /// Deletes every edge of `parent_id` and inserts `edges` in its place.
    /// Atomic only when `conn` is a transaction.
    pub async fn replace_components<C: ConnectionTrait>(
        conn: &C,
        parent_id: i64,
        edges: &[(i64, Decimal)],
    ) -> Result<Vec<product_bom::Model>, ServiceError> {
        Self::delete_by_parent(conn, parent_id).await?;

        let now = Utc::now();
        let mut inserted = Vec::with_capacity(edges.len());
        for (component_id, quantity) in edges {
            let edge = product_bom::ActiveModel {
                parent_product_id: Set(parent_id),
                component_product_id: Set(*component_id),
                quantity: Set(*quantity),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(storage_error("bom.insert_edge"))?;
            inserted.push(edge);
        }
        Ok(inserted)
    }

    /// Returns the number of removed edges.
    pub async fn delete_by_parent<C: ConnectionTrait>(
        conn: &C,
        parent_id: i64,
    ) -> Result<u64, ServiceError> {
        let result = ProductBom::delete_many()
            .filter(product_bom::Column::ParentProductId.eq(parent_id))
            .exec(conn)
            .await
            .map_err(storage_error("bom.delete_by_parent"))?;
        Ok(result.rows_affected)
    }

    /// True when the product sits on either end of any edge.
    pub async fn references_product<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
    ) -> Result<bool, ServiceError> {
        let count = ProductBom::find()
            .filter(
                product_bom::Column::ParentProductId
                    .eq(product_id)
                    .or(product_bom::Column::ComponentProductId.eq(product_id)),
            )
            .count(conn)
            .await
            .map_err(storage_error("bom.references_product"))?;
        Ok(count > 0)
    }
}
