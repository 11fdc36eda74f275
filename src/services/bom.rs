pub mod explosion;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    db::UnitOfWork,
    entities::product_bom,
    errors::ServiceError,
    repositories::BomRepository,
    services::catalog::{load_summaries, require_product, ProductSummary},
};

pub use explosion::{
    BomComponent, BomExploder, BomGraph, ConnectionGraph, InMemoryBomGraph, MaterialRequirements,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BomComponentInput {
    pub component_product_id: i64,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplaceBomInput {
    pub parent_product_id: i64,
    #[validate(length(min = 1))]
    pub components: Vec<BomComponentInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplosionInput {
    pub parent_product_id: i64,
    pub quantity: Decimal,
}

/// A component line with its product resolved.
#[derive(Debug, Clone, Serialize)]
pub struct BomLineView {
    pub id: i64,
    pub component: ProductSummary,
    pub quantity: Decimal,
}

impl BomLineView {
    /// Edges whose component is missing from `summaries` are skipped.
    pub fn from_edges(
        edges: &[product_bom::Model],
        summaries: &HashMap<i64, ProductSummary>,
    ) -> Vec<Self> {
        edges
            .iter()
            .filter_map(|edge| {
                summaries
                    .get(&edge.component_product_id)
                    .map(|component| BomLineView {
                        id: edge.id,
                        component: component.clone(),
                        quantity: edge.quantity,
                    })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BomView {
    pub parent: ProductSummary,
    pub components: Vec<BomLineView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BomUsage {
    pub parent: ProductSummary,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequirementLine {
    pub product: ProductSummary,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplosionResult {
    pub parent: ProductSummary,
    pub quantity: Decimal,
    pub requirements: Vec<RequirementLine>,
    pub total_materials: usize,
}

/// Bill of Materials service: edge management and standalone explosion
#[derive(Clone)]
pub struct BomService {
    db: Arc<DatabaseConnection>,
    uow: UnitOfWork,
    max_depth: usize,
}

impl BomService {
    pub fn new(db: Arc<DatabaseConnection>, uow: UnitOfWork, max_depth: usize) -> Self {
        Self { db, uow, max_depth }
    }

    /// Replaces the whole component set of a parent.
    #[instrument(skip(self), fields(parent = input.parent_product_id))]
    pub async fn replace_bom(&self, input: ReplaceBomInput) -> Result<BomView, ServiceError> {
        input.validate()?;
        let parent_id = input.parent_product_id;

        let mut seen = HashSet::new();
        let mut edges = Vec::with_capacity(input.components.len());
        for line in &input.components {
            if line.component_product_id == parent_id {
                return Err(ServiceError::InvalidBom(format!(
                    "product {} cannot be its own component",
                    parent_id
                )));
            }
            if !seen.insert(line.component_product_id) {
                return Err(ServiceError::InvalidBom(format!(
                    "component {} listed more than once",
                    line.component_product_id
                )));
            }
            if line.quantity <= Decimal::ZERO {
                return Err(ServiceError::invalid_field(
                    "components.quantity",
                    "quantity must be positive",
                ));
            }
            edges.push((line.component_product_id, line.quantity));
        }

        let tx = self.uow.begin().await?;
        let outcome = self
            .uow
            .within_deadline("replace_bom", async {
                let conn = tx.conn();
                let parent = require_product(conn, parent_id).await?;
                for (component_id, _) in &edges {
                    require_product(conn, *component_id).await?;
                }

                let stored = BomRepository::replace_components(conn, parent_id, &edges).await?;

                let graph = ConnectionGraph::new(conn);
                BomExploder::new(&graph, self.max_depth)
                    .ensure_acyclic(parent_id)
                    .await?;

                let summaries =
                    load_summaries(conn, stored.iter().map(|e| e.component_product_id)).await?;
                Ok(BomView {
                    parent: ProductSummary::from(&parent),
                    components: BomLineView::from_edges(&stored, &summaries),
                })
            })
            .await;
        let view = tx.finish(outcome).await?;

        info!(
            parent_product_id = parent_id,
            components = view.components.len(),
            "BOM replaced"
        );
        Ok(view)
    }

    /// Every parent with its components.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<BomView>, ServiceError> {
        let db = &*self.db;
        let edges = BomRepository::all(db).await?;
        let summaries = load_summaries(
            db,
            edges
                .iter()
                .flat_map(|e| [e.parent_product_id, e.component_product_id])
                .collect::<HashSet<_>>(),
        )
        .await?;

        let mut grouped: BTreeMap<i64, Vec<product_bom::Model>> = BTreeMap::new();
        for edge in edges {
            grouped.entry(edge.parent_product_id).or_default().push(edge);
        }

        Ok(grouped
            .into_iter()
            .filter_map(|(parent_id, edges)| {
                summaries.get(&parent_id).map(|parent| BomView {
                    parent: parent.clone(),
                    components: BomLineView::from_edges(&edges, &summaries),
                })
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_parent(&self, parent_id: i64) -> Result<BomView, ServiceError> {
        let db = &*self.db;
        let parent = require_product(db, parent_id).await?;
        let edges = BomRepository::components(db, parent_id).await?;
        if edges.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "Product {} has no bill of materials",
                parent_id
            )));
        }
        let summaries = load_summaries(db, edges.iter().map(|e| e.component_product_id)).await?;
        Ok(BomView {
            parent: ProductSummary::from(&parent),
            components: BomLineView::from_edges(&edges, &summaries),
        })
    }

    /// Parents that consume `component_id`.
    #[instrument(skip(self))]
    pub async fn get_by_component(&self, component_id: i64) -> Result<Vec<BomUsage>, ServiceError> {
        let db = &*self.db;
        require_product(db, component_id).await?;
        let edges = BomRepository::usages(db, component_id).await?;
        let summaries = load_summaries(db, edges.iter().map(|e| e.parent_product_id)).await?;
        Ok(edges
            .iter()
            .filter_map(|edge| {
                summaries.get(&edge.parent_product_id).map(|parent| BomUsage {
                    parent: parent.clone(),
                    quantity: edge.quantity,
                })
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn delete_by_parent(&self, parent_id: i64) -> Result<(), ServiceError> {
        let removed = BomRepository::delete_by_parent(&*self.db, parent_id).await?;
        if removed == 0 {
            return Err(ServiceError::NotFound(format!(
                "Product {} has no bill of materials",
                parent_id
            )));
        }
        info!(parent_product_id = parent_id, removed, "BOM deleted");
        Ok(())
    }

    /// Planning view of the explosion, without touching inventory.
    #[instrument(skip(self))]
    pub async fn explode(&self, input: ExplosionInput) -> Result<ExplosionResult, ServiceError> {
        let db = &*self.db;
        let parent = require_product(db, input.parent_product_id).await?;

        let graph = ConnectionGraph::new(db);
        let requirements = BomExploder::new(&graph, self.max_depth)
            .explode(input.parent_product_id, input.quantity)
            .await?;

        let summaries = load_summaries(db, requirements.product_ids()).await?;
        let lines: Vec<RequirementLine> = requirements
            .iter()
            .filter_map(|(id, quantity)| {
                summaries.get(&id).map(|product| RequirementLine {
                    product: product.clone(),
                    quantity,
                })
            })
            .collect();

        Ok(ExplosionResult {
            parent: ProductSummary::from(&parent),
            quantity: input.quantity,
            total_materials: lines.len(),
            requirements: lines,
        })
    }
}
