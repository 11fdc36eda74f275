/*!
 * # BOM explosion
 *
 * Resolves a requested quantity of a product into the terminal materials it
 * consumes. A product is terminal when it is purchased or has no
 * components; every other product is replaced by its components scaled by
 * the per-unit quantity, recursively. Quantities reaching the same
 * terminal product along different paths are summed.
 *
 * The walk tracks the current ancestor path and refuses to descend into a
 * product already on it, and never goes deeper than the configured limit,
 * so a malformed graph yields `InvalidBom` instead of unbounded recursion.
 */

use async_trait::async_trait;
use futures::future::BoxFuture;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, EntityTrait};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::entities::product::{Entity as Product, OperationType};
use crate::errors::{storage_error, ServiceError};
use crate::repositories::BomRepository;

/// One outgoing edge of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BomComponent {
    pub component_id: i64,
    pub quantity: Decimal,
}

/// Read access to the product graph.
#[async_trait]
pub trait BomGraph: Send + Sync {
    /// `None` when the product does not exist.
    async fn operation_type(&self, product_id: i64)
        -> Result<Option<OperationType>, ServiceError>;

    async fn components(&self, parent_id: i64) -> Result<Vec<BomComponent>, ServiceError>;
}

/// Graph backed by the database, read through whatever connection the
/// caller is using (pool or open transaction).
pub struct ConnectionGraph<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ConnectionGraph<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C: ConnectionTrait> BomGraph for ConnectionGraph<'_, C> {
    async fn operation_type(
        &self,
        product_id: i64,
    ) -> Result<Option<OperationType>, ServiceError> {
        let product = Product::find_by_id(product_id)
            .one(self.conn)
            .await
            .map_err(storage_error("explosion.operation_type"))?;
        Ok(product.map(|p| p.operation_type))
    }

    async fn components(&self, parent_id: i64) -> Result<Vec<BomComponent>, ServiceError> {
        Ok(BomRepository::components(self.conn, parent_id)
            .await?
            .into_iter()
            .map(|edge| BomComponent {
                component_id: edge.component_product_id,
                quantity: edge.quantity,
            })
            .collect())
    }
}

/// Graph held in memory, for planning tools and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBomGraph {
    products: HashMap<i64, OperationType>,
    edges: HashMap<i64, Vec<BomComponent>>,
}

impl InMemoryBomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, id: i64, operation_type: OperationType) -> Self {
        self.products.insert(id, operation_type);
        self
    }

    pub fn with_edge(mut self, parent: i64, component: i64, quantity: Decimal) -> Self {
        self.edges.entry(parent).or_default().push(BomComponent {
            component_id: component,
            quantity,
        });
        self
    }
}

#[async_trait]
impl BomGraph for InMemoryBomGraph {
    async fn operation_type(
        &self,
        product_id: i64,
    ) -> Result<Option<OperationType>, ServiceError> {
        Ok(self.products.get(&product_id).copied())
    }

    async fn components(&self, parent_id: i64) -> Result<Vec<BomComponent>, ServiceError> {
        Ok(self.edges.get(&parent_id).cloned().unwrap_or_default())
    }
}

/// Terminal product id → total required quantity, ordered by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterialRequirements(BTreeMap<i64, Decimal>);

impl MaterialRequirements {
    /// Fails with `BadRequest` when the running total leaves the decimal range.
    pub fn add(&mut self, product_id: i64, quantity: Decimal) -> Result<(), ServiceError> {
        let total = self.0.entry(product_id).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(quantity)
            .ok_or_else(|| out_of_range(product_id))?;
        Ok(())
    }

    /// Sums `other` into `self` key by key.
    pub fn merge(&mut self, other: MaterialRequirements) -> Result<(), ServiceError> {
        for (product_id, quantity) in other.0 {
            self.add(product_id, quantity)?;
        }
        Ok(())
    }

    pub fn get(&self, product_id: i64) -> Option<Decimal> {
        self.0.get(&product_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, Decimal)> + '_ {
        self.0.iter().map(|(id, qty)| (*id, *qty))
    }

    pub fn product_ids(&self) -> Vec<i64> {
        self.0.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn out_of_range(product_id: i64) -> ServiceError {
    ServiceError::BadRequest(format!(
        "Required quantity for product {} is out of range",
        product_id
    ))
}

pub struct BomExploder<'g, G: ?Sized> {
    graph: &'g G,
    max_depth: usize,
}

impl<'g, G: BomGraph + ?Sized> BomExploder<'g, G> {
    pub fn new(graph: &'g G, max_depth: usize) -> Self {
        Self { graph, max_depth }
    }

    /// Terminal requirements for `quantity` units of `product_id`.
    pub async fn explode(
        &self,
        product_id: i64,
        quantity: Decimal,
    ) -> Result<MaterialRequirements, ServiceError> {
        if quantity <= Decimal::ZERO {
            return Err(ServiceError::invalid_field(
                "quantity",
                "quantity must be positive",
            ));
        }
        let mut acc = MaterialRequirements::default();
        let mut path = Vec::new();
        self.walk(product_id, quantity, &mut path, &mut acc).await?;
        Ok(acc)
    }

    /// Explodes every line and sums the results into one map.
    pub async fn explode_all(
        &self,
        lines: &[(i64, Decimal)],
    ) -> Result<MaterialRequirements, ServiceError> {
        let mut total = MaterialRequirements::default();
        for (product_id, quantity) in lines {
            total.merge(self.explode(*product_id, *quantity).await?)?;
        }
        Ok(total)
    }

    fn walk<'a>(
        &'a self,
        product_id: i64,
        quantity: Decimal,
        path: &'a mut Vec<i64>,
        acc: &'a mut MaterialRequirements,
    ) -> BoxFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            if path.contains(&product_id) {
                return Err(ServiceError::InvalidBom(format!(
                    "cycle through product {} (path {:?})",
                    product_id, path
                )));
            }
            if path.len() >= self.max_depth {
                return Err(ServiceError::InvalidBom(format!(
                    "nesting deeper than {} levels below product {}",
                    self.max_depth,
                    path.first().copied().unwrap_or(product_id)
                )));
            }

            let operation_type = self
                .graph
                .operation_type(product_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Product {} not found", product_id))
                })?;

            if operation_type == OperationType::Purchase {
                return acc.add(product_id, quantity);
            }

            let components = self.graph.components(product_id).await?;
            if components.is_empty() {
                return acc.add(product_id, quantity);
            }

            path.push(product_id);
            for component in components {
                let scaled = quantity
                    .checked_mul(component.quantity)
                    .ok_or_else(|| out_of_range(component.component_id))?;
                self.walk(component.component_id, scaled, &mut *path, &mut *acc)
                    .await?;
            }
            path.pop();
            Ok(())
        })
    }

    /// Fails with `InvalidBom` when `root` can reach itself along any edge,
    /// regardless of operation types.
    pub async fn ensure_acyclic(&self, root: i64) -> Result<(), ServiceError> {
        let mut path = Vec::new();
        let mut finished = HashSet::new();
        self.visit(root, &mut path, &mut finished).await
    }

    fn visit<'a>(
        &'a self,
        product_id: i64,
        path: &'a mut Vec<i64>,
        finished: &'a mut HashSet<i64>,
    ) -> BoxFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            if path.contains(&product_id) {
                return Err(ServiceError::InvalidBom(format!(
                    "product {} would consume itself",
                    product_id
                )));
            }
            if finished.contains(&product_id) {
                return Ok(());
            }
            if path.len() >= self.max_depth {
                return Err(ServiceError::InvalidBom(format!(
                    "nesting deeper than {} levels",
                    self.max_depth
                )));
            }

            path.push(product_id);
            for component in self.graph.components(product_id).await? {
                self.visit(component.component_id, &mut *path, &mut *finished)
                    .await?;
            }
            path.pop();
            finished.insert(product_id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    fn sample_graph() -> InMemoryBomGraph {
        // A -> {B: 2, C: 1}, B -> {C: 3}
        InMemoryBomGraph::new()
            .with_product(1, OperationType::Manufacturing)
            .with_product(2, OperationType::Packaging)
            .with_product(3, OperationType::Purchase)
            .with_edge(1, 2, dec!(2))
            .with_edge(1, 3, dec!(1))
            .with_edge(2, 3, dec!(3))
    }

    #[tokio::test]
    async fn converging_paths_are_summed() {
        let graph = sample_graph();
        let req = BomExploder::new(&graph, 32).explode(1, dec!(1)).await.unwrap();
        assert_eq!(req.len(), 1);
        assert_eq!(req.get(3), Some(dec!(7)));
        assert_eq!(req.get(2), None);
    }

    #[tokio::test]
    async fn purchase_products_are_terminal_even_with_edges() {
        let graph = InMemoryBomGraph::new()
            .with_product(1, OperationType::Purchase)
            .with_product(2, OperationType::Purchase)
            .with_edge(1, 2, dec!(4));
        let req = BomExploder::new(&graph, 32).explode(1, dec!(5)).await.unwrap();
        let mut expected = MaterialRequirements::default();
        expected.add(1, dec!(5)).unwrap();
        assert_eq!(req, expected);
    }

    #[tokio::test]
    async fn fractional_quantities_stay_exact() {
        let graph = InMemoryBomGraph::new()
            .with_product(1, OperationType::Manufacturing)
            .with_product(2, OperationType::Manufacturing)
            .with_product(3, OperationType::Purchase)
            .with_edge(1, 2, dec!(0.1))
            .with_edge(2, 3, dec!(0.5));
        let req = BomExploder::new(&graph, 32).explode(1, dec!(3)).await.unwrap();
        assert_eq!(req.get(3), Some(dec!(0.15)));
    }

    #[tokio::test]
    async fn cycles_are_rejected() {
        let graph = InMemoryBomGraph::new()
            .with_product(1, OperationType::Manufacturing)
            .with_product(2, OperationType::Manufacturing)
            .with_edge(1, 2, dec!(1))
            .with_edge(2, 1, dec!(1));
        let exploder = BomExploder::new(&graph, 32);
        assert_matches!(
            exploder.explode(1, dec!(1)).await,
            Err(ServiceError::InvalidBom(_))
        );
        assert_matches!(
            exploder.ensure_acyclic(2).await,
            Err(ServiceError::InvalidBom(_))
        );
    }

    #[tokio::test]
    async fn depth_limit_is_enforced() {
        let mut graph = InMemoryBomGraph::new().with_product(10, OperationType::Purchase);
        for id in 0..10 {
            graph = graph
                .with_product(id, OperationType::Manufacturing)
                .with_edge(id, id + 1, dec!(1));
        }
        assert!(BomExploder::new(&graph, 16).explode(0, dec!(1)).await.is_ok());
        assert_matches!(
            BomExploder::new(&graph, 4).explode(0, dec!(1)).await,
            Err(ServiceError::InvalidBom(_))
        );
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let graph = sample_graph().with_edge(2, 99, dec!(1));
        assert_matches!(
            BomExploder::new(&graph, 32).explode(1, dec!(1)).await,
            Err(ServiceError::NotFound(_))
        );
    }

    #[tokio::test]
    async fn non_positive_quantity_is_rejected() {
        let graph = sample_graph();
        assert_matches!(
            BomExploder::new(&graph, 32).explode(1, dec!(0)).await,
            Err(ServiceError::ValidationError { .. })
        );
    }

    #[tokio::test]
    async fn diamond_is_not_a_cycle() {
        let graph = InMemoryBomGraph::new()
            .with_product(1, OperationType::Manufacturing)
            .with_product(2, OperationType::Manufacturing)
            .with_product(3, OperationType::Manufacturing)
            .with_product(4, OperationType::Purchase)
            .with_edge(1, 2, dec!(1))
            .with_edge(1, 3, dec!(1))
            .with_edge(2, 4, dec!(1))
            .with_edge(3, 4, dec!(1));
        let exploder = BomExploder::new(&graph, 32);
        exploder.ensure_acyclic(1).await.unwrap();
        let req = exploder
            .explode_all(&[(1, dec!(2)), (4, dec!(1))])
            .await
            .unwrap();
        assert_eq!(req.get(4), Some(dec!(5)));
    }

    #[tokio::test]
    async fn quantities_beyond_decimal_range_are_rejected() {
        let graph = InMemoryBomGraph::new()
            .with_product(1, OperationType::Manufacturing)
            .with_product(2, OperationType::Manufacturing)
            .with_product(3, OperationType::Purchase)
            .with_edge(1, 2, Decimal::from(i64::MAX))
            .with_edge(2, 3, Decimal::from(i64::MAX));
        assert_matches!(
            BomExploder::new(&graph, 32).explode(1, dec!(1)).await,
            Err(ServiceError::BadRequest(_))
        );

        let mut req = MaterialRequirements::default();
        req.add(3, Decimal::MAX).unwrap();
        assert_matches!(req.add(3, dec!(1)), Err(ServiceError::BadRequest(_)));
        assert_eq!(req.get(3), Some(Decimal::MAX));
    }
}
