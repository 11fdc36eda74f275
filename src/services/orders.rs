/*!
 * # Orders
 *
 * Order creation is the fulfillment transaction: every line is exploded
 * through the BOM graph, demand is summed per terminal material, the
 * affected inventory rows are locked in ascending product order, stock is
 * checked as a whole, and only then are the order, its items, the stock
 * deductions and the audit rows written. Everything runs in a single unit
 * of work; any failure rolls all of it back.
 *
 * Reads (`get_order`, `list_orders`) derive profit/loss figures from the
 * stored totals without recomputing them. Amounts that would leave the
 * decimal range are rejected when written, so reads never overflow.
 */

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::{
    auth::AuthUser,
    db::{Transaction, UnitOfWork},
    entities::{
        customer::{self, Entity as Customer},
        inventory_history::ReferenceType,
        order::{self, Entity as Order},
        order_image::{self, Entity as OrderImage},
        order_item::{self, Entity as OrderItem},
    },
    errors::{storage_error, InventoryShortage, ServiceError},
    repositories::{
        inventory_repository::new_version, CodeKind, HistoryEntry, HistoryRepository,
        InventoryRepository,
    },
    services::{
        bom::{BomExploder, ConnectionGraph, MaterialRequirements},
        catalog::{load_summaries, require_product, AddImageInput, ProductSummary},
        customers::{require_customer, CustomerSummary},
    },
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Progress of one fulfillment attempt, logged as it advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentStage {
    Started,
    MaterialsComputed,
    InventoryLocked,
    SufficiencyVerified,
    OrderPersisted,
    InventoryDeducted,
    HistoryRecorded,
    Committed,
    RolledBack,
}

impl fmt::Display for FulfillmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Started => "STARTED",
            Self::MaterialsComputed => "MATERIALS_COMPUTED",
            Self::InventoryLocked => "INVENTORY_LOCKED",
            Self::SufficiencyVerified => "SUFFICIENCY_VERIFIED",
            Self::OrderPersisted => "ORDER_PERSISTED",
            Self::InventoryDeducted => "INVENTORY_DEDUCTED",
            Self::HistoryRecorded => "HISTORY_RECORDED",
            Self::Committed => "COMMITTED",
            Self::RolledBack => "ROLLED_BACK",
        };
        f.write_str(name)
    }
}

fn enter(stage: FulfillmentStage) {
    debug!(stage = %stage, "Order fulfillment stage");
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub quantity: i64,
    pub selling_price: Decimal,
    /// Unit cost; defaults to the product's catalog cost
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub discount_percent: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderInput {
    pub customer_id: i64,
    pub order_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    #[serde(default)]
    pub additional_cost: Decimal,
    pub additional_cost_note: Option<String>,
    #[serde(default)]
    pub tax_percent: Decimal,
    #[validate(length(min = 1))]
    pub items: Vec<OrderItemInput>,
}

/// Header fields only; items and stored totals are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateOrderInput {
    pub customer_id: Option<i64>,
    pub order_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub additional_cost: Option<Decimal>,
    pub additional_cost_note: Option<String>,
    pub tax_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSort {
    OrderDateAsc,
    OrderDateDesc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    pub customer_id: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub sort_by: Option<OrderSort>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    #[serde(flatten)]
    pub item: order_item::Model,
    pub product: Option<ProductSummary>,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: order::Model,
    pub customer: Option<CustomerSummary>,
    pub items: Vec<OrderItemView>,
    pub images: Vec<order_image::Model>,
    pub total_amount: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderListItem {
    #[serde(flatten)]
    pub order: order::Model,
    pub customer: Option<CustomerSummary>,
    pub product_count: usize,
    pub total_amount: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
}

/// `selling_price * quantity` less `discount_percent`, truncated toward zero
/// at `scale` decimal places. `None` when the amount leaves the decimal range.
pub fn line_final_amount(
    selling_price: Decimal,
    quantity: i64,
    discount_percent: Decimal,
    scale: u32,
) -> Option<Decimal> {
    let subtotal = selling_price.checked_mul(Decimal::from(quantity))?;
    let discount = subtotal.checked_mul(discount_percent)? / HUNDRED;
    Some((subtotal - discount).round_dp_with_strategy(scale, RoundingStrategy::ToZero))
}

/// `(Σ final + additional cost)` plus tax.
pub fn order_total_amount(
    revenue: Decimal,
    additional_cost: Decimal,
    tax_percent: Decimal,
    scale: u32,
) -> Option<Decimal> {
    let base = revenue.checked_add(additional_cost)?;
    let tax = base.checked_mul(tax_percent)? / HUNDRED;
    Some(base.checked_add(tax)?.round_dp_with_strategy(scale, RoundingStrategy::ToZero))
}

/// Profit and its percentage of `cost`; zero percent when cost is zero.
pub fn profit_loss(revenue: Decimal, cost: Decimal) -> Option<(Decimal, Decimal)> {
    let pl = revenue.checked_sub(cost)?;
    let pct = if cost.is_zero() {
        Decimal::ZERO
    } else {
        pl.checked_div(cost)?.checked_mul(HUNDRED)?.round_dp(2)
    };
    Some((pl, pct))
}

/// Total amount, profit/loss and percentage for an order's stored figures.
fn order_figures(
    revenue: Decimal,
    additional_cost: Decimal,
    tax_percent: Decimal,
    original_cost: Decimal,
    scale: u32,
) -> Result<(Decimal, Decimal, Decimal), ServiceError> {
    let total_amount = order_total_amount(revenue, additional_cost, tax_percent, scale)
        .ok_or_else(|| amount_out_of_range("order total"))?;
    let (pl, pct) = revenue
        .checked_add(additional_cost)
        .and_then(|income| profit_loss(income, original_cost))
        .ok_or_else(|| amount_out_of_range("order profit/loss"))?;
    Ok((total_amount, pl, pct))
}

fn amount_out_of_range(what: &str) -> ServiceError {
    ServiceError::BadRequest(format!("{} is out of range", what))
}

/// Whole units to take from stock for a possibly fractional requirement.
fn whole_units(product_id: i64, quantity: Decimal) -> Result<i64, ServiceError> {
    quantity.ceil().to_i64().ok_or_else(|| {
        ServiceError::BadRequest(format!(
            "Required quantity for product {} is out of range",
            product_id
        ))
    })
}

/// Service for creating and querying orders
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
    uow: UnitOfWork,
    max_depth: usize,
    currency_scale: u32,
}

impl OrderService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        uow: UnitOfWork,
        max_depth: usize,
        currency_scale: u32,
    ) -> Self {
        Self {
            db,
            uow,
            max_depth,
            currency_scale,
        }
    }

    /// Creates an order and deducts the exploded material demand from stock.
    #[instrument(skip(self, input, actor), fields(customer_id = input.customer_id, lines = input.items.len()))]
    pub async fn create_order(
        &self,
        input: CreateOrderInput,
        actor: &AuthUser,
    ) -> Result<OrderDetail, ServiceError> {
        validate_order_input(&input)?;
        enter(FulfillmentStage::Started);

        let tx = self.uow.begin().await?;
        let outcome = self
            .uow
            .within_deadline("create_order", self.fulfil(&tx, &input, actor))
            .await;
        if let Err(err) = &outcome {
            enter(FulfillmentStage::RolledBack);
            warn!(error = %err, "Order creation aborted");
        }
        let order_id = tx.finish(outcome).await?;
        enter(FulfillmentStage::Committed);

        info!(order_id, "Order created");
        self.get_order(order_id).await
    }

    async fn fulfil(
        &self,
        tx: &Transaction,
        input: &CreateOrderInput,
        actor: &AuthUser,
    ) -> Result<i64, ServiceError> {
        let conn = tx.conn();
        require_customer(conn, input.customer_id).await?;

        let mut costs = HashMap::new();
        for item in &input.items {
            if !costs.contains_key(&item.product_id) {
                let product = require_product(conn, item.product_id).await?;
                costs.insert(product.id, product.cost);
            }
        }

        let lines: Vec<(i64, Decimal)> = input
            .items
            .iter()
            .map(|item| (item.product_id, Decimal::from(item.quantity)))
            .collect();
        let graph = ConnectionGraph::new(conn);
        let requirements: MaterialRequirements = BomExploder::new(&graph, self.max_depth)
            .explode_all(&lines)
            .await?;
        let mut required = BTreeMap::new();
        for (product_id, quantity) in requirements.iter() {
            required.insert(product_id, whole_units(product_id, quantity)?);
        }
        enter(FulfillmentStage::MaterialsComputed);

        let locked: HashMap<i64, _> =
            InventoryRepository::lock_many_for_update(conn, required.keys().copied())
                .await?
                .into_iter()
                .map(|row| (row.product_id, row))
                .collect();
        enter(FulfillmentStage::InventoryLocked);

        for (&product_id, &needed) in &required {
            let available = locked.get(&product_id).map_or(0, |row| row.quantity);
            if available < needed {
                return Err(ServiceError::InventoryQuantityExceeded(
                    InventoryShortage::new(product_id, needed, available),
                ));
            }
        }
        enter(FulfillmentStage::SufficiencyVerified);

        let mut priced = Vec::with_capacity(input.items.len());
        let mut total_original_cost = Decimal::ZERO;
        let mut total_sales_revenue = Decimal::ZERO;
        for item in &input.items {
            let original_price = item
                .original_price
                .or_else(|| costs.get(&item.product_id).copied())
                .unwrap_or(Decimal::ZERO);
            let final_amount = line_final_amount(
                item.selling_price,
                item.quantity,
                item.discount_percent,
                self.currency_scale,
            )
            .ok_or_else(|| amount_out_of_range("line amount"))?;
            total_original_cost = original_price
                .checked_mul(Decimal::from(item.quantity))
                .and_then(|cost| total_original_cost.checked_add(cost))
                .ok_or_else(|| amount_out_of_range("original cost"))?;
            total_sales_revenue = total_sales_revenue
                .checked_add(final_amount)
                .ok_or_else(|| amount_out_of_range("sales revenue"))?;
            priced.push((item, original_price, final_amount));
        }
        order_figures(
            total_sales_revenue,
            input.additional_cost,
            input.tax_percent,
            total_original_cost,
            self.currency_scale,
        )?;

        let now = Utc::now();
        let header = order::ActiveModel {
            code: Set(CodeKind::Order.placeholder()),
            customer_id: Set(input.customer_id),
            order_date: Set(input.order_date.unwrap_or(now)),
            note: Set(input.note.clone()),
            total_original_cost: Set(Decimal::ZERO),
            total_sales_revenue: Set(Decimal::ZERO),
            additional_cost: Set(input.additional_cost),
            additional_cost_note: Set(input.additional_cost_note.clone()),
            tax_percent: Set(input.tax_percent),
            created_by: Set(actor.user_id.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(storage_error("orders.insert_header"))?;

        for (item, original_price, final_amount) in priced {
            order_item::ActiveModel {
                order_id: Set(header.id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
                selling_price: Set(item.selling_price),
                original_price: Set(original_price),
                discount_percent: Set(item.discount_percent),
                final_amount: Set(final_amount),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(storage_error("orders.insert_item"))?;
        }

        let code = CodeKind::Order.format(header.id);
        let mut active: order::ActiveModel = header.into();
        active.code = Set(code.clone());
        active.total_original_cost = Set(total_original_cost);
        active.total_sales_revenue = Set(total_sales_revenue);
        let order = active
            .update(conn)
            .await
            .map_err(storage_error("orders.finalize_header"))?;
        enter(FulfillmentStage::OrderPersisted);

        let actor_name = actor.display_name();
        let mut deducted = Vec::with_capacity(required.len());
        for (&product_id, &needed) in &required {
            let row = locked.get(&product_id).ok_or_else(|| {
                ServiceError::InternalError(format!("inventory row {} not locked", product_id))
            })?;
            let updated = InventoryRepository::update_quantity(
                conn,
                product_id,
                row.quantity - needed,
                &row.version,
                &new_version(),
            )
            .await?;
            deducted.push((product_id, needed, updated.quantity));
        }
        enter(FulfillmentStage::InventoryDeducted);

        for (product_id, needed, final_quantity) in deducted {
            HistoryRepository::append(
                conn,
                HistoryEntry {
                    product_id,
                    delta: -needed,
                    final_quantity,
                    actor_id: &actor.user_id,
                    actor_name: &actor_name,
                    note: Some(format!("Order {}", code)),
                    reference_type: ReferenceType::Order,
                    reference_id: Some(order.id),
                },
            )
            .await?;
        }
        enter(FulfillmentStage::HistoryRecorded);

        Ok(order.id)
    }

    /// Order with items, customer and derived profit/loss.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: i64) -> Result<OrderDetail, ServiceError> {
        let db = &*self.db;
        let order = Order::find_by_id(id)
            .one(db)
            .await
            .map_err(storage_error("orders.get"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", id)))?;

        let customer = Customer::find_by_id(order.customer_id)
            .one(db)
            .await
            .map_err(storage_error("orders.get.customer"))?
            .map(CustomerSummary::from);

        let items = OrderItem::find()
            .filter(order_item::Column::OrderId.eq(id))
            .order_by_asc(order_item::Column::Id)
            .all(db)
            .await
            .map_err(storage_error("orders.get.items"))?;
        let summaries = load_summaries(db, items.iter().map(|i| i.product_id)).await?;

        let items = items
            .into_iter()
            .map(|item| {
                let (pl, pct) = item
                    .original_price
                    .checked_mul(Decimal::from(item.quantity))
                    .and_then(|cost| profit_loss(item.final_amount, cost))
                    .ok_or_else(|| amount_out_of_range("item profit/loss"))?;
                Ok(OrderItemView {
                    product: summaries.get(&item.product_id).cloned(),
                    profit_loss: pl,
                    profit_loss_percent: pct,
                    item,
                })
            })
            .collect::<Result<Vec<_>, ServiceError>>()?;
        let images = self.list_images(id).await?;

        let (total_amount, pl, pct) = self.derived_totals(&order)?;
        Ok(OrderDetail {
            order,
            customer,
            items,
            images,
            total_amount,
            profit_loss: pl,
            profit_loss_percent: pct,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderListItem>, ServiceError> {
        let db = &*self.db;
        let mut query = Order::find();
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(order::Column::CustomerId.eq(customer_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(order::Column::OrderDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(order::Column::OrderDate.lte(to));
        }
        query = match filter.sort_by {
            Some(OrderSort::OrderDateAsc) => query
                .order_by_asc(order::Column::OrderDate)
                .order_by_asc(order::Column::Id),
            Some(OrderSort::OrderDateDesc) => query
                .order_by_desc(order::Column::OrderDate)
                .order_by_desc(order::Column::Id),
            None => query.order_by_desc(order::Column::Id),
        };
        let orders = query
            .all(db)
            .await
            .map_err(storage_error("orders.list"))?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let mut item_counts: HashMap<i64, usize> = HashMap::new();
        for item in OrderItem::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .all(db)
            .await
            .map_err(storage_error("orders.list.items"))?
        {
            *item_counts.entry(item.order_id).or_default() += 1;
        }

        let customer_ids: Vec<i64> = orders.iter().map(|o| o.customer_id).collect();
        let customers: HashMap<i64, CustomerSummary> = Customer::find()
            .filter(customer::Column::Id.is_in(customer_ids))
            .all(db)
            .await
            .map_err(storage_error("orders.list.customers"))?
            .into_iter()
            .map(|c| (c.id, CustomerSummary::from(c)))
            .collect();

        orders
            .into_iter()
            .map(|order| {
                let (total_amount, pl, pct) = self.derived_totals(&order)?;
                Ok(OrderListItem {
                    customer: customers.get(&order.customer_id).cloned(),
                    product_count: item_counts.get(&order.id).copied().unwrap_or(0),
                    total_amount,
                    profit_loss: pl,
                    profit_loss_percent: pct,
                    order,
                })
            })
            .collect()
    }

    /// Updates header fields; stored totals are not recomputed.
    #[instrument(skip(self))]
    pub async fn update_order(
        &self,
        id: i64,
        input: UpdateOrderInput,
    ) -> Result<OrderDetail, ServiceError> {
        input.validate()?;
        if input.additional_cost.map_or(false, |c| c.is_sign_negative()) {
            return Err(ServiceError::invalid_field(
                "additional_cost",
                "additional cost must not be negative",
            ));
        }
        if let Some(tax) = input.tax_percent {
            check_percent("tax_percent", tax)?;
        }

        let db = &*self.db;
        let existing = Order::find_by_id(id)
            .one(db)
            .await
            .map_err(storage_error("orders.update.find"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", id)))?;
        if let Some(customer_id) = input.customer_id {
            require_customer(db, customer_id).await?;
        }
        order_figures(
            existing.total_sales_revenue,
            input.additional_cost.unwrap_or(existing.additional_cost),
            input.tax_percent.unwrap_or(existing.tax_percent),
            existing.total_original_cost,
            self.currency_scale,
        )?;

        let mut active: order::ActiveModel = existing.into();
        if let Some(customer_id) = input.customer_id {
            active.customer_id = Set(customer_id);
        }
        if let Some(date) = input.order_date {
            active.order_date = Set(date);
        }
        if input.note.is_some() {
            active.note = Set(input.note);
        }
        if let Some(cost) = input.additional_cost {
            active.additional_cost = Set(cost);
        }
        if input.additional_cost_note.is_some() {
            active.additional_cost_note = Set(input.additional_cost_note);
        }
        if let Some(tax) = input.tax_percent {
            active.tax_percent = Set(tax);
        }
        active.updated_at = Set(Utc::now());
        active
            .update(db)
            .await
            .map_err(storage_error("orders.update"))?;

        info!(order_id = id, "Order header updated");
        self.get_order(id).await
    }

    fn derived_totals(
        &self,
        order: &order::Model,
    ) -> Result<(Decimal, Decimal, Decimal), ServiceError> {
        order_figures(
            order.total_sales_revenue,
            order.additional_cost,
            order.tax_percent,
            order.total_original_cost,
            self.currency_scale,
        )
    }

    // ---- images ----

    /// Stores image metadata for an order. A new primary image demotes the
    /// previous one.
    #[instrument(skip(self))]
    pub async fn add_image(
        &self,
        order_id: i64,
        input: AddImageInput,
    ) -> Result<order_image::Model, ServiceError> {
        input.validate()?;
        let tx = self.uow.begin().await?;
        let outcome = self
            .uow
            .within_deadline("add_order_image", async {
                let conn = tx.conn();
                Order::find_by_id(order_id)
                    .one(conn)
                    .await
                    .map_err(storage_error("orders.add_image.find"))?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Order {} not found", order_id))
                    })?;
                if input.is_primary {
                    OrderImage::update_many()
                        .col_expr(
                            order_image::Column::IsPrimary,
                            sea_orm::sea_query::Expr::value(false),
                        )
                        .filter(order_image::Column::OrderId.eq(order_id))
                        .exec(conn)
                        .await
                        .map_err(storage_error("orders.demote_primary_image"))?;
                }
                order_image::ActiveModel {
                    order_id: Set(order_id),
                    image_key: Set(input.image_key.clone()),
                    is_primary: Set(input.is_primary),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(conn)
                .await
                .map_err(storage_error("orders.add_image"))
            })
            .await;
        let image = tx.finish(outcome).await?;
        info!(order_id, image_id = image.id, "Order image stored");
        Ok(image)
    }

    #[instrument(skip(self))]
    pub async fn list_images(&self, order_id: i64) -> Result<Vec<order_image::Model>, ServiceError> {
        OrderImage::find()
            .filter(order_image::Column::OrderId.eq(order_id))
            .order_by_desc(order_image::Column::IsPrimary)
            .order_by_asc(order_image::Column::Id)
            .all(&*self.db)
            .await
            .map_err(storage_error("orders.list_images"))
    }

    #[instrument(skip(self))]
    pub async fn delete_image(&self, order_id: i64, image_id: i64) -> Result<(), ServiceError> {
        let result = OrderImage::delete_many()
            .filter(order_image::Column::Id.eq(image_id))
            .filter(order_image::Column::OrderId.eq(order_id))
            .exec(&*self.db)
            .await
            .map_err(storage_error("orders.delete_image"))?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Image {} not found for order {}",
                image_id, order_id
            )));
        }
        Ok(())
    }
}

fn check_percent(field: &'static str, value: Decimal) -> Result<(), ServiceError> {
    if value < Decimal::ZERO || value > HUNDRED {
        return Err(ServiceError::invalid_field(
            field,
            format!("{} must be between 0 and 100", field),
        ));
    }
    Ok(())
}

/// Rejects input the engine must never act on, before any storage access.
fn validate_order_input(input: &CreateOrderInput) -> Result<(), ServiceError> {
    input.validate()?;
    if input.additional_cost.is_sign_negative() {
        return Err(ServiceError::invalid_field(
            "additional_cost",
            "additional cost must not be negative",
        ));
    }
    check_percent("tax_percent", input.tax_percent)?;
    for item in &input.items {
        if item.quantity <= 0 {
            return Err(ServiceError::invalid_field(
                "items.quantity",
                format!("quantity for product {} must be positive", item.product_id),
            ));
        }
        if item.selling_price.is_sign_negative()
            || item.original_price.map_or(false, |p| p.is_sign_negative())
        {
            return Err(ServiceError::invalid_field(
                "items.selling_price",
                "prices must not be negative",
            ));
        }
        check_percent("items.discount_percent", item.discount_percent)?;
    }
    Ok(())
}
