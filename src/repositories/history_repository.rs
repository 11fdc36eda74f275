use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::inventory_history::{self, Entity as InventoryHistory, ReferenceType};
use crate::errors::{storage_error, ServiceError};

/// One audit row to append.
#[derive(Debug, Clone)]
pub struct HistoryEntry<'a> {
    pub product_id: i64,
    pub delta: i64,
    pub final_quantity: i64,
    pub actor_id: &'a str,
    pub actor_name: &'a str,
    pub note: Option<String>,
    pub reference_type: ReferenceType,
    /// Order or receipt id; `None` for manual adjustments
    pub reference_id: Option<i64>,
}

pub struct HistoryRepository;

impl HistoryRepository {
    pub async fn append<C: ConnectionTrait>(
        conn: &C,
        entry: HistoryEntry<'_>,
    ) -> Result<inventory_history::Model, ServiceError> {
        inventory_history::ActiveModel {
            product_id: Set(entry.product_id),
            quantity: Set(entry.delta),
            final_quantity: Set(entry.final_quantity),
            actor_id: Set(entry.actor_id.to_string()),
            actor_name: Set(entry.actor_name.to_string()),
            imported_at: Set(Utc::now()),
            note: Set(entry.note),
            reference_type: Set(Some(entry.reference_type)),
            reference_id: Set(entry.reference_id),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(storage_error("history.append"))
    }

    /// Newest first.
    pub async fn list_by_product<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
    ) -> Result<Vec<inventory_history::Model>, ServiceError> {
        InventoryHistory::find()
            .filter(inventory_history::Column::ProductId.eq(product_id))
            .order_by_desc(inventory_history::Column::ImportedAt)
            .order_by_desc(inventory_history::Column::Id)
            .all(conn)
            .await
            .map_err(storage_error("history.list_by_product"))
    }

    pub async fn list_by_reference<C: ConnectionTrait>(
        conn: &C,
        kind: ReferenceType,
        reference_id: i64,
    ) -> Result<Vec<inventory_history::Model>, ServiceError> {
        InventoryHistory::find()
            .filter(inventory_history::Column::ReferenceType.eq(kind))
            .filter(inventory_history::Column::ReferenceId.eq(reference_id))
            .order_by_asc(inventory_history::Column::Id)
            .all(conn)
            .await
            .map_err(storage_error("history.list_by_reference"))
    }

    pub async fn exists_for_product<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
    ) -> Result<bool, ServiceError> {
        let count = InventoryHistory::find()
            .filter(inventory_history::Column::ProductId.eq(product_id))
            .count(conn)
            .await
            .map_err(storage_error("history.exists_for_product"))?;
        Ok(count > 0)
    }
}
