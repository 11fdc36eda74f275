use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::{
    auth::AuthUser,
    db::{Transaction, UnitOfWork},
    entities::{
        inventory_history::ReferenceType,
        inventory_receipt::{self, Entity as InventoryReceipt},
        inventory_receipt_item::{self, Entity as InventoryReceiptItem},
    },
    errors::{storage_error, ServiceError},
    repositories::{
        inventory_repository::new_version, CodeKind, HistoryEntry, HistoryRepository,
        InventoryRepository,
    },
    services::catalog::{load_summaries, require_product, ProductSummary},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReceiptItemInput {
    pub product_id: i64,
    #[validate(range(min = 1))]
    pub quantity: i64,
    pub unit_cost: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReceiptInput {
    pub receipt_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[validate(length(min = 1))]
    pub items: Vec<ReceiptItemInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiptItemView {
    #[serde(flatten)]
    pub item: inventory_receipt_item::Model,
    pub product: Option<ProductSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiptDetail {
    #[serde(flatten)]
    pub receipt: inventory_receipt::Model,
    pub items: Vec<ReceiptItemView>,
}

/// Service for stock receipts
#[derive(Clone)]
pub struct ReceiptService {
    db: Arc<DatabaseConnection>,
    uow: UnitOfWork,
}

impl ReceiptService {
    pub fn new(db: Arc<DatabaseConnection>, uow: UnitOfWork) -> Self {
        Self { db, uow }
    }

    /// Records the receipt and adds every line to inventory.
    #[instrument(skip(self, input, actor), fields(lines = input.items.len(), actor = %actor.user_id))]
    pub async fn create_receipt(
        &self,
        input: CreateReceiptInput,
        actor: &AuthUser,
    ) -> Result<ReceiptDetail, ServiceError> {
        input.validate()?;
        for item in &input.items {
            if item.quantity <= 0 {
                return Err(ServiceError::invalid_field(
                    "items.quantity",
                    "quantity must be positive",
                ));
            }
            if item.unit_cost.map_or(false, |c| c.is_sign_negative()) {
                return Err(ServiceError::invalid_field(
                    "items.unit_cost",
                    "unit cost must not be negative",
                ));
            }
        }

        let tx = self.uow.begin().await?;
        let outcome = self
            .uow
            .within_deadline("create_receipt", self.receive(&tx, &input, actor))
            .await;
        let receipt_id = tx.finish(outcome).await?;

        info!(receipt_id, "Inventory receipt created");
        self.get_receipt(receipt_id).await
    }

    async fn receive(
        &self,
        tx: &Transaction,
        input: &CreateReceiptInput,
        actor: &AuthUser,
    ) -> Result<i64, ServiceError> {
        let conn = tx.conn();
        let mut incoming: BTreeMap<i64, i64> = BTreeMap::new();
        for item in &input.items {
            if !incoming.contains_key(&item.product_id) {
                require_product(conn, item.product_id).await?;
            }
            let total = incoming.entry(item.product_id).or_insert(0);
            *total = total
                .checked_add(item.quantity)
                .ok_or_else(|| quantity_out_of_range(item.product_id))?;
        }

        // Same ascending order as order fulfillment; rows created here stay
        // locked by this transaction.
        let mut stock: HashMap<i64, _> =
            InventoryRepository::lock_many_for_update(conn, incoming.keys().copied())
                .await?
                .into_iter()
                .map(|row| (row.product_id, row))
                .collect();
        for &product_id in incoming.keys() {
            if !stock.contains_key(&product_id) {
                debug!(product_id, "Creating first inventory row");
                let row = InventoryRepository::create_initial(conn, product_id, 0).await?;
                stock.insert(product_id, row);
            }
        }
        for (&product_id, &quantity) in &incoming {
            let on_hand = stock.get(&product_id).map_or(0, |row| row.quantity);
            if on_hand.checked_add(quantity).is_none() {
                return Err(quantity_out_of_range(product_id));
            }
        }

        let now = Utc::now();
        let header = inventory_receipt::ActiveModel {
            code: Set(CodeKind::Receipt.placeholder()),
            user_id: Set(actor.user_id.clone()),
            receipt_date: Set(input.receipt_date.unwrap_or(now)),
            notes: Set(input.notes.clone()),
            total_items: Set(input.items.len() as i32),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(storage_error("receipts.insert_header"))?;

        let code = CodeKind::Receipt.format(header.id);
        let mut active: inventory_receipt::ActiveModel = header.into();
        active.code = Set(code.clone());
        let receipt = active
            .update(conn)
            .await
            .map_err(storage_error("receipts.assign_code"))?;

        let actor_name = actor.display_name();
        for item in &input.items {
            inventory_receipt_item::ActiveModel {
                receipt_id: Set(receipt.id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
                unit_cost: Set(item.unit_cost),
                notes: Set(item.notes.clone()),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(storage_error("receipts.insert_item"))?;

            let row = stock.get(&item.product_id).ok_or_else(|| {
                ServiceError::InternalError(format!("inventory row {} not locked", item.product_id))
            })?;
            let updated = InventoryRepository::update_quantity(
                conn,
                item.product_id,
                row.quantity + item.quantity,
                &row.version,
                &new_version(),
            )
            .await?;
            let final_quantity = updated.quantity;
            stock.insert(item.product_id, updated);

            HistoryRepository::append(
                conn,
                HistoryEntry {
                    product_id: item.product_id,
                    delta: item.quantity,
                    final_quantity,
                    actor_id: &actor.user_id,
                    actor_name: &actor_name,
                    note: Some(format!("Receipt {}", code)),
                    reference_type: ReferenceType::Receipt,
                    reference_id: Some(receipt.id),
                },
            )
            .await?;
        }

        Ok(receipt.id)
    }

    #[instrument(skip(self))]
    pub async fn get_receipt(&self, id: i64) -> Result<ReceiptDetail, ServiceError> {
        let receipt = InventoryReceipt::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(storage_error("receipts.get"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Receipt {} not found", id)))?;
        self.with_items(receipt).await
    }

    #[instrument(skip(self))]
    pub async fn get_receipt_by_code(&self, code: &str) -> Result<ReceiptDetail, ServiceError> {
        let receipt = InventoryReceipt::find()
            .filter(inventory_receipt::Column::Code.eq(code))
            .one(&*self.db)
            .await
            .map_err(storage_error("receipts.get_by_code"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Receipt {} not found", code)))?;
        self.with_items(receipt).await
    }

    /// Newest first.
    #[instrument(skip(self))]
    pub async fn list_receipts(&self) -> Result<Vec<inventory_receipt::Model>, ServiceError> {
        InventoryReceipt::find()
            .order_by_desc(inventory_receipt::Column::ReceiptDate)
            .order_by_desc(inventory_receipt::Column::Id)
            .all(&*self.db)
            .await
            .map_err(storage_error("receipts.list"))
    }

    async fn with_items(
        &self,
        receipt: inventory_receipt::Model,
    ) -> Result<ReceiptDetail, ServiceError> {
        let db = &*self.db;
        let items = InventoryReceiptItem::find()
            .filter(inventory_receipt_item::Column::ReceiptId.eq(receipt.id))
            .order_by_asc(inventory_receipt_item::Column::Id)
            .all(db)
            .await
            .map_err(storage_error("receipts.items"))?;
        let summaries = load_summaries(db, items.iter().map(|i| i.product_id)).await?;
        Ok(ReceiptDetail {
            receipt,
            items: items
                .into_iter()
                .map(|item| ReceiptItemView {
                    product: summaries.get(&item.product_id).cloned(),
                    item,
                })
                .collect(),
        })
    }
}

fn quantity_out_of_range(product_id: i64) -> ServiceError {
    ServiceError::BadRequest(format!(
        "Received quantity for product {} is out of range",
        product_id
    ))
}
