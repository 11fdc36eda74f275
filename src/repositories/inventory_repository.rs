use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::BTreeSet;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entities::inventory::{self, Entity as Inventory};
use crate::errors::{storage_error, ServiceError};

/// Fresh optimistic-concurrency token.
pub fn new_version() -> String {
    Uuid::new_v4().to_string()
}

/// Per-product on-hand quantities.
pub struct InventoryRepository;

impl InventoryRepository {
    pub async fn find_by_product<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
    ) -> Result<Option<inventory::Model>, ServiceError> {
        Inventory::find_by_id(product_id)
            .one(conn)
            .await
            .map_err(storage_error("inventory.find_by_product"))
    }

    pub async fn list_all<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<Vec<inventory::Model>, ServiceError> {
        Inventory::find()
            .order_by_asc(inventory::Column::ProductId)
            .all(conn)
            .await
            .map_err(storage_error("inventory.list_all"))
    }

    /// Reads the rows for `product_ids` under an exclusive row lock held
    /// until the enclosing transaction ends. Ids are de-duplicated and
    /// locked in ascending order. Products without a row are absent from
    /// the result.
    ///
    /// Backends without `FOR UPDATE` (SQLite) serialise writers at the
    /// transaction level instead.
    pub async fn lock_many_for_update<C: ConnectionTrait>(
        conn: &C,
        product_ids: impl IntoIterator<Item = i64>,
    ) -> Result<Vec<inventory::Model>, ServiceError> {
        let ids: Vec<i64> = product_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = Inventory::find()
            .filter(inventory::Column::ProductId.is_in(ids.clone()))
            .order_by_asc(inventory::Column::ProductId);
        if conn.get_database_backend() == DbBackend::Postgres {
            query = query.lock_exclusive();
        }

        let rows = query
            .all(conn)
            .await
            .map_err(storage_error("inventory.lock_many_for_update"))?;
        debug!(requested = ids.len(), locked = rows.len(), "Inventory rows locked");
        Ok(rows)
    }

    pub async fn create_initial<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
        quantity: i64,
    ) -> Result<inventory::Model, ServiceError> {
        inventory::ActiveModel {
            product_id: Set(product_id),
            quantity: Set(quantity),
            version: Set(new_version()),
            updated_at: Set(Utc::now()),
        }
        .insert(conn)
        .await
        .map_err(storage_error("inventory.create_initial"))
    }

    /// Compare-and-swap write. Fails with `ConcurrentModification` when the
    /// stored version is no longer `expected_version`.
    pub async fn update_quantity<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
        new_quantity: i64,
        expected_version: &str,
        new_version: &str,
    ) -> Result<inventory::Model, ServiceError> {
        if new_quantity < 0 {
            return Err(ServiceError::BadRequest(format!(
                "Inventory for product {} cannot go negative",
                product_id
            )));
        }

        let now = Utc::now();
        let result = Inventory::update_many()
            .col_expr(inventory::Column::Quantity, Expr::value(new_quantity))
            .col_expr(inventory::Column::Version, Expr::value(new_version))
            .col_expr(inventory::Column::UpdatedAt, Expr::value(now))
            .filter(inventory::Column::ProductId.eq(product_id))
            .filter(inventory::Column::Version.eq(expected_version))
            .exec(conn)
            .await
            .map_err(storage_error("inventory.update_quantity"))?;

        if result.rows_affected == 0 {
            warn!(product_id, expected_version, "Inventory version mismatch");
            return Err(ServiceError::ConcurrentModification(product_id));
        }

        Ok(inventory::Model {
            product_id,
            quantity: new_quantity,
            version: new_version.to_string(),
            updated_at: now,
        })
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, product_id: i64) -> Result<(), ServiceError> {
        Inventory::delete_by_id(product_id)
            .exec(conn)
            .await
            .map_err(storage_error("inventory.delete"))?;
        Ok(())
    }
}
