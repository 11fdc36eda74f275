//! Reference data: categories, units of measure, products and product
//! image metadata.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    db::UnitOfWork,
    entities::{
        inventory_receipt_item, order_item,
        product::{self, Entity as Product, OperationType},
        product_category::{self, Entity as ProductCategory},
        product_image::{self, Entity as ProductImage},
        unit_of_measure::{self, Entity as UnitOfMeasure},
    },
    errors::{storage_error, ServiceError},
    repositories::{BomRepository, CodeKind, HistoryRepository, InventoryRepository},
    services::bom::BomLineView,
};

/// Compact product reference embedded in other payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub operation_type: OperationType,
    pub unit_id: Option<i64>,
}

impl From<&product::Model> for ProductSummary {
    fn from(p: &product::Model) -> Self {
        Self {
            id: p.id,
            code: p.code.clone(),
            name: p.name.clone(),
            operation_type: p.operation_type,
            unit_id: p.unit_id,
        }
    }
}

/// Loads summaries for `ids`; unknown ids are simply missing from the map.
pub async fn load_summaries<C: ConnectionTrait>(
    conn: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, ProductSummary>, ServiceError> {
    let ids: Vec<i64> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let products = Product::find()
        .filter(product::Column::Id.is_in(ids))
        .all(conn)
        .await
        .map_err(storage_error("catalog.load_summaries"))?;
    Ok(products
        .iter()
        .map(|p| (p.id, ProductSummary::from(p)))
        .collect())
}

pub(crate) async fn require_product<C: ConnectionTrait>(
    conn: &C,
    product_id: i64,
) -> Result<product::Model, ServiceError> {
    Product::find_by_id(product_id)
        .one(conn)
        .await
        .map_err(storage_error("catalog.find_product"))?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCodeNameInput {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCodeNameInput {
    #[validate(length(min = 1, max = 32))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub cost: Decimal,
    pub category_id: Option<i64>,
    pub unit_id: Option<i64>,
    pub description: Option<String>,
    pub operation_type: OperationType,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub cost: Option<Decimal>,
    pub category_id: Option<i64>,
    pub unit_id: Option<i64>,
    pub description: Option<String>,
    pub operation_type: Option<OperationType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    /// Category code, matched exactly
    pub category: Option<String>,
    pub operation_type: Option<OperationType>,
    /// Skip loading BOM lines for each product
    #[serde(default)]
    pub no_bom: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddImageInput {
    #[validate(length(min = 1, max = 512))]
    pub image_key: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryView {
    pub quantity: i64,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsedInView {
    pub parent: ProductSummary,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: product::Model,
    pub category: Option<product_category::Model>,
    pub unit: Option<unit_of_measure::Model>,
    pub inventory: Option<InventoryView>,
    pub bom: Vec<BomLineView>,
    pub used_in: Vec<UsedInView>,
    pub images: Vec<product_image::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductListItem {
    #[serde(flatten)]
    pub product: product::Model,
    pub category_code: Option<String>,
    pub inventory_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bom: Option<Vec<BomLineView>>,
}

#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
    uow: UnitOfWork,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>, uow: UnitOfWork) -> Self {
        Self { db, uow }
    }

    // ---- categories ----

    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        input: CreateCodeNameInput,
    ) -> Result<product_category::Model, ServiceError> {
        input.validate()?;
        let db = &*self.db;
        self.ensure_category_code_free(&input.code, None).await?;

        let created = product_category::ActiveModel {
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(storage_error("catalog.create_category"))?;

        info!(category_id = created.id, code = %created.code, "Category created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: i64,
        input: UpdateCodeNameInput,
    ) -> Result<product_category::Model, ServiceError> {
        input.validate()?;
        let existing = self.get_category(id).await?;
        if let Some(code) = &input.code {
            self.ensure_category_code_free(code, Some(id)).await?;
        }

        let mut active: product_category::ActiveModel = existing.into();
        if let Some(code) = input.code {
            active.code = Set(code);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if input.description.is_some() {
            active.description = Set(input.description);
        }
        active
            .update(&*self.db)
            .await
            .map_err(storage_error("catalog.update_category"))
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: i64) -> Result<product_category::Model, ServiceError> {
        ProductCategory::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(storage_error("catalog.get_category"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_category_by_code(
        &self,
        code: &str,
    ) -> Result<product_category::Model, ServiceError> {
        ProductCategory::find()
            .filter(product_category::Column::Code.eq(code))
            .one(&*self.db)
            .await
            .map_err(storage_error("catalog.get_category_by_code"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", code)))
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<product_category::Model>, ServiceError> {
        ProductCategory::find()
            .order_by_asc(product_category::Column::Code)
            .all(&*self.db)
            .await
            .map_err(storage_error("catalog.list_categories"))
    }

    async fn ensure_category_code_free(
        &self,
        code: &str,
        except: Option<i64>,
    ) -> Result<(), ServiceError> {
        let clash = ProductCategory::find()
            .filter(product_category::Column::Code.eq(code))
            .one(&*self.db)
            .await
            .map_err(storage_error("catalog.category_code_lookup"))?;
        match clash {
            Some(existing) if Some(existing.id) != except => Err(ServiceError::BadRequest(
                format!("Category code {} already exists", code),
            )),
            _ => Ok(()),
        }
    }

    // ---- units ----

    #[instrument(skip(self))]
    pub async fn create_unit(
        &self,
        input: CreateCodeNameInput,
    ) -> Result<unit_of_measure::Model, ServiceError> {
        input.validate()?;
        self.ensure_unit_code_free(&input.code, None).await?;

        let created = unit_of_measure::ActiveModel {
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(storage_error("catalog.create_unit"))?;

        info!(unit_id = created.id, code = %created.code, "Unit created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_unit(
        &self,
        id: i64,
        input: UpdateCodeNameInput,
    ) -> Result<unit_of_measure::Model, ServiceError> {
        input.validate()?;
        let existing = self.get_unit(id).await?;
        if let Some(code) = &input.code {
            self.ensure_unit_code_free(code, Some(id)).await?;
        }

        let mut active: unit_of_measure::ActiveModel = existing.into();
        if let Some(code) = input.code {
            active.code = Set(code);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if input.description.is_some() {
            active.description = Set(input.description);
        }
        active
            .update(&*self.db)
            .await
            .map_err(storage_error("catalog.update_unit"))
    }

    #[instrument(skip(self))]
    pub async fn get_unit(&self, id: i64) -> Result<unit_of_measure::Model, ServiceError> {
        UnitOfMeasure::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(storage_error("catalog.get_unit"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Unit {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_unit_by_code(&self, code: &str) -> Result<unit_of_measure::Model, ServiceError> {
        UnitOfMeasure::find()
            .filter(unit_of_measure::Column::Code.eq(code))
            .one(&*self.db)
            .await
            .map_err(storage_error("catalog.get_unit_by_code"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Unit {} not found", code)))
    }

    #[instrument(skip(self))]
    pub async fn list_units(&self) -> Result<Vec<unit_of_measure::Model>, ServiceError> {
        UnitOfMeasure::find()
            .order_by_asc(unit_of_measure::Column::Code)
            .all(&*self.db)
            .await
            .map_err(storage_error("catalog.list_units"))
    }

    async fn ensure_unit_code_free(&self, code: &str, except: Option<i64>) -> Result<(), ServiceError> {
        let clash = UnitOfMeasure::find()
            .filter(unit_of_measure::Column::Code.eq(code))
            .one(&*self.db)
            .await
            .map_err(storage_error("catalog.unit_code_lookup"))?;
        match clash {
            Some(existing) if Some(existing.id) != except => Err(ServiceError::BadRequest(
                format!("Unit code {} already exists", code),
            )),
            _ => Ok(()),
        }
    }

    // ---- products ----

    /// Creates the product and its empty inventory row in one unit of work.
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<product::Model, ServiceError> {
        input.validate()?;
        if input.cost.is_sign_negative() {
            return Err(ServiceError::invalid_field("cost", "cost must not be negative"));
        }

        let tx = self.uow.begin().await?;
        let outcome = self
            .uow
            .within_deadline("create_product", async {
                let conn = tx.conn();
                check_references(conn, input.category_id, input.unit_id).await?;

                let now = Utc::now();
                let inserted = product::ActiveModel {
                    code: Set(CodeKind::Product.placeholder()),
                    name: Set(input.name.clone()),
                    cost: Set(input.cost),
                    category_id: Set(input.category_id),
                    unit_id: Set(input.unit_id),
                    description: Set(input.description.clone()),
                    operation_type: Set(input.operation_type),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(conn)
                .await
                .map_err(storage_error("catalog.insert_product"))?;

                let mut active: product::ActiveModel = inserted.clone().into();
                active.code = Set(CodeKind::Product.format(inserted.id));
                let product = active
                    .update(conn)
                    .await
                    .map_err(storage_error("catalog.assign_product_code"))?;

                InventoryRepository::create_initial(conn, product.id, 0).await?;
                Ok(product)
            })
            .await;
        let product = tx.finish(outcome).await?;

        info!(product_id = product.id, code = %product.code, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: i64,
        input: UpdateProductInput,
    ) -> Result<product::Model, ServiceError> {
        input.validate()?;
        if input.cost.map_or(false, |c| c.is_sign_negative()) {
            return Err(ServiceError::invalid_field("cost", "cost must not be negative"));
        }

        let db = &*self.db;
        let existing = require_product(db, id).await?;
        check_references(db, input.category_id, input.unit_id).await?;

        let mut active: product::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(cost) = input.cost {
            active.cost = Set(cost);
        }
        if input.category_id.is_some() {
            active.category_id = Set(input.category_id);
        }
        if input.unit_id.is_some() {
            active.unit_id = Set(input.unit_id);
        }
        if input.description.is_some() {
            active.description = Set(input.description);
        }
        if let Some(op) = input.operation_type {
            active.operation_type = Set(op);
        }
        active.updated_at = Set(Utc::now());

        active
            .update(db)
            .await
            .map_err(storage_error("catalog.update_product"))
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> Result<ProductDetail, ServiceError> {
        let db = &*self.db;
        let product = require_product(db, id).await?;

        let category = match product.category_id {
            Some(cid) => ProductCategory::find_by_id(cid)
                .one(db)
                .await
                .map_err(storage_error("catalog.product_category"))?,
            None => None,
        };
        let unit = match product.unit_id {
            Some(uid) => UnitOfMeasure::find_by_id(uid)
                .one(db)
                .await
                .map_err(storage_error("catalog.product_unit"))?,
            None => None,
        };
        let inventory = InventoryRepository::find_by_product(db, id)
            .await?
            .map(|inv| InventoryView {
                quantity: inv.quantity,
                version: inv.version,
            });

        let components = BomRepository::components(db, id).await?;
        let usages = BomRepository::usages(db, id).await?;
        let summaries = load_summaries(
            db,
            components
                .iter()
                .map(|e| e.component_product_id)
                .chain(usages.iter().map(|e| e.parent_product_id)),
        )
        .await?;

        let bom = BomLineView::from_edges(&components, &summaries);
        let used_in = usages
            .iter()
            .filter_map(|edge| {
                summaries
                    .get(&edge.parent_product_id)
                    .map(|parent| UsedInView {
                        parent: parent.clone(),
                        quantity: edge.quantity,
                    })
            })
            .collect();

        let images = self.list_images(id).await?;

        Ok(ProductDetail {
            product,
            category,
            unit,
            inventory,
            bom,
            used_in,
            images,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductListItem>, ServiceError> {
        let db = &*self.db;
        let mut query = Product::find().order_by_asc(product::Column::Id);

        let categories: HashMap<i64, String> = ProductCategory::find()
            .all(db)
            .await
            .map_err(storage_error("catalog.list_products.categories"))?
            .into_iter()
            .map(|c| (c.id, c.code))
            .collect();

        if let Some(code) = &filter.category {
            match categories.iter().find(|(_, c)| *c == code) {
                Some((id, _)) => query = query.filter(product::Column::CategoryId.eq(*id)),
                None => return Ok(Vec::new()),
            }
        }
        if let Some(op) = filter.operation_type {
            query = query.filter(product::Column::OperationType.eq(op));
        }

        let products = query
            .all(db)
            .await
            .map_err(storage_error("catalog.list_products"))?;
        let stock: HashMap<i64, i64> = InventoryRepository::list_all(db)
            .await?
            .into_iter()
            .map(|inv| (inv.product_id, inv.quantity))
            .collect();

        let boms = if filter.no_bom {
            None
        } else {
            let edges = BomRepository::all(db).await?;
            let summaries =
                load_summaries(db, edges.iter().map(|e| e.component_product_id)).await?;
            let mut grouped: HashMap<i64, Vec<BomLineView>> = HashMap::new();
            for edge in &edges {
                grouped
                    .entry(edge.parent_product_id)
                    .or_default()
                    .extend(BomLineView::from_edges(std::slice::from_ref(edge), &summaries));
            }
            Some(grouped)
        };

        Ok(products
            .into_iter()
            .map(|p| ProductListItem {
                category_code: p.category_id.and_then(|id| categories.get(&id).cloned()),
                inventory_quantity: stock.get(&p.id).copied().unwrap_or(0),
                bom: boms
                    .as_ref()
                    .map(|g| g.get(&p.id).cloned().unwrap_or_default()),
                product: p,
            })
            .collect())
    }

    /// Refused while anything still points at the product.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        let tx = self.uow.begin().await?;
        let outcome = self
            .uow
            .within_deadline("delete_product", async {
                let conn = tx.conn();
                require_product(conn, id).await?;

                if BomRepository::references_product(conn, id).await? {
                    return Err(ServiceError::BadRequest(format!(
                        "Product {} is referenced by a bill of materials",
                        id
                    )));
                }
                let order_refs = order_item::Entity::find()
                    .filter(order_item::Column::ProductId.eq(id))
                    .count(conn)
                    .await
                    .map_err(storage_error("catalog.delete_product.order_refs"))?;
                let receipt_refs = inventory_receipt_item::Entity::find()
                    .filter(inventory_receipt_item::Column::ProductId.eq(id))
                    .count(conn)
                    .await
                    .map_err(storage_error("catalog.delete_product.receipt_refs"))?;
                if order_refs > 0 || receipt_refs > 0 {
                    return Err(ServiceError::BadRequest(format!(
                        "Product {} appears on orders or receipts",
                        id
                    )));
                }
                if HistoryRepository::exists_for_product(conn, id).await? {
                    return Err(ServiceError::BadRequest(format!(
                        "Product {} has inventory history",
                        id
                    )));
                }

                ProductImage::delete_many()
                    .filter(product_image::Column::ProductId.eq(id))
                    .exec(conn)
                    .await
                    .map_err(storage_error("catalog.delete_product.images"))?;
                InventoryRepository::delete(conn, id).await?;
                Product::delete_by_id(id)
                    .exec(conn)
                    .await
                    .map_err(storage_error("catalog.delete_product"))?;
                Ok(())
            })
            .await;
        tx.finish(outcome).await?;

        info!(product_id = id, "Product deleted");
        Ok(())
    }

    // ---- images ----

    /// Stores image metadata. A new primary image demotes the previous one.
    #[instrument(skip(self))]
    pub async fn add_image(
        &self,
        product_id: i64,
        input: AddImageInput,
    ) -> Result<product_image::Model, ServiceError> {
        input.validate()?;
        let tx = self.uow.begin().await?;
        let outcome = self
            .uow
            .within_deadline("add_image", async {
                let conn = tx.conn();
                require_product(conn, product_id).await?;
                if input.is_primary {
                    ProductImage::update_many()
                        .col_expr(
                            product_image::Column::IsPrimary,
                            sea_orm::sea_query::Expr::value(false),
                        )
                        .filter(product_image::Column::ProductId.eq(product_id))
                        .exec(conn)
                        .await
                        .map_err(storage_error("catalog.demote_primary_image"))?;
                }
                product_image::ActiveModel {
                    product_id: Set(product_id),
                    image_key: Set(input.image_key.clone()),
                    is_primary: Set(input.is_primary),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(conn)
                .await
                .map_err(storage_error("catalog.add_image"))
            })
            .await;
        tx.finish(outcome).await
    }

    #[instrument(skip(self))]
    pub async fn list_images(
        &self,
        product_id: i64,
    ) -> Result<Vec<product_image::Model>, ServiceError> {
        ProductImage::find()
            .filter(product_image::Column::ProductId.eq(product_id))
            .order_by_desc(product_image::Column::IsPrimary)
            .order_by_asc(product_image::Column::Id)
            .all(&*self.db)
            .await
            .map_err(storage_error("catalog.list_images"))
    }

    #[instrument(skip(self))]
    pub async fn delete_image(&self, product_id: i64, image_id: i64) -> Result<(), ServiceError> {
        let result = ProductImage::delete_many()
            .filter(product_image::Column::Id.eq(image_id))
            .filter(product_image::Column::ProductId.eq(product_id))
            .exec(&*self.db)
            .await
            .map_err(storage_error("catalog.delete_image"))?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Image {} not found for product {}",
                image_id, product_id
            )));
        }
        Ok(())
    }
}

async fn check_references<C: ConnectionTrait>(
    conn: &C,
    category_id: Option<i64>,
    unit_id: Option<i64>,
) -> Result<(), ServiceError> {
    if let Some(cid) = category_id {
        ProductCategory::find_by_id(cid)
            .one(conn)
            .await
            .map_err(storage_error("catalog.check_category"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", cid)))?;
    }
    if let Some(uid) = unit_id {
        UnitOfMeasure::find_by_id(uid)
            .one(conn)
            .await
            .map_err(storage_error("catalog.check_unit"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Unit {} not found", uid)))?;
    }
    Ok(())
}
