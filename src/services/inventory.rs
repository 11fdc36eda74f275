use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    auth::AuthUser,
    db::UnitOfWork,
    entities::{
        inventory,
        inventory_history::{self, ReferenceType},
    },
    errors::ServiceError,
    repositories::{
        inventory_repository::new_version, HistoryEntry, HistoryRepository, InventoryRepository,
    },
    services::catalog::{load_summaries, require_product, ProductSummary},
};

/// Absolute stock correction guarded by the caller's last seen version.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdjustQuantityInput {
    #[validate(range(min = 0))]
    pub quantity: i64,
    #[validate(length(min = 1))]
    pub version: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryEntry {
    pub product: ProductSummary,
    pub quantity: i64,
    pub version: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Service for reading and correcting the inventory ledger
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DatabaseConnection>,
    uow: UnitOfWork,
}

impl InventoryService {
    pub fn new(db: Arc<DatabaseConnection>, uow: UnitOfWork) -> Self {
        Self { db, uow }
    }

    #[instrument(skip(self))]
    pub async fn list_inventory(&self) -> Result<Vec<InventoryEntry>, ServiceError> {
        let db = &*self.db;
        let rows = InventoryRepository::list_all(db).await?;
        let summaries = load_summaries(db, rows.iter().map(|r| r.product_id)).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                summaries.get(&row.product_id).map(|product| InventoryEntry {
                    product: product.clone(),
                    quantity: row.quantity,
                    version: row.version,
                    updated_at: row.updated_at,
                })
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_product(&self, product_id: i64) -> Result<inventory::Model, ServiceError> {
        let db = &*self.db;
        require_product(db, product_id).await?;
        InventoryRepository::find_by_product(db, product_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No inventory for product {}", product_id))
            })
    }

    /// Newest first.
    #[instrument(skip(self))]
    pub async fn histories(
        &self,
        product_id: i64,
    ) -> Result<Vec<inventory_history::Model>, ServiceError> {
        let db = &*self.db;
        require_product(db, product_id).await?;
        HistoryRepository::list_by_product(db, product_id).await
    }

    /// Sets the on-hand quantity and records the delta as an adjustment.
    #[instrument(skip(self, actor), fields(actor = %actor.user_id))]
    pub async fn adjust_quantity(
        &self,
        product_id: i64,
        input: AdjustQuantityInput,
        actor: &AuthUser,
    ) -> Result<inventory::Model, ServiceError> {
        input.validate()?;
        let actor_name = actor.display_name();

        let tx = self.uow.begin().await?;
        let outcome = self
            .uow
            .within_deadline("adjust_inventory", async {
                let conn = tx.conn();
                require_product(conn, product_id).await?;
                let current = InventoryRepository::lock_many_for_update(conn, [product_id])
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("No inventory for product {}", product_id))
                    })?;

                let updated = InventoryRepository::update_quantity(
                    conn,
                    product_id,
                    input.quantity,
                    &input.version,
                    &new_version(),
                )
                .await?;

                HistoryRepository::append(
                    conn,
                    HistoryEntry {
                        product_id,
                        delta: updated.quantity - current.quantity,
                        final_quantity: updated.quantity,
                        actor_id: &actor.user_id,
                        actor_name: &actor_name,
                        note: input.note.clone(),
                        reference_type: ReferenceType::Adjustment,
                        reference_id: None,
                    },
                )
                .await?;
                Ok(updated)
            })
            .await;
        let updated = tx.finish(outcome).await?;

        info!(product_id, quantity = updated.quantity, "Inventory adjusted");
        Ok(updated)
    }
}
