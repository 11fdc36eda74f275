use futures::executor::block_on;
use management_api::{
    entities::product::OperationType,
    services::{
        bom::{BomExploder, InMemoryBomGraph, MaterialRequirements},
        orders::{line_final_amount, order_total_amount},
    },
};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Layered DAG: every product only consumes products with a higher id, and
/// the last layer is purchased.
fn layered_graph(edges: &[(u8, u8, u32)], size: i64) -> InMemoryBomGraph {
    let mut graph = InMemoryBomGraph::new();
    for id in 0..size {
        let op = if id == size - 1 {
            OperationType::Purchase
        } else {
            OperationType::Manufacturing
        };
        graph = graph.with_product(id, op);
    }
    let mut seen = std::collections::HashSet::new();
    for &(a, b, qty) in edges {
        let (a, b) = (i64::from(a) % size, i64::from(b) % size);
        if a == b {
            continue;
        }
        let (parent, component) = if a < b { (a, b) } else { (b, a) };
        if seen.insert((parent, component)) {
            graph = graph.with_edge(parent, component, Decimal::new(i64::from(qty), 2));
        }
    }
    graph
}

fn explode(graph: &InMemoryBomGraph, product: i64, qty: Decimal) -> MaterialRequirements {
    block_on(BomExploder::new(graph, 64).explode(product, qty)).expect("acyclic graph explodes")
}

proptest! {
    #[test]
    fn explosion_is_additive_in_quantity(
        edges in prop::collection::vec((0u8..8, 0u8..8, 1u32..500), 0..20),
        a in 1i64..50,
        b in 1i64..50,
    ) {
        let graph = layered_graph(&edges, 8);
        let mut separate = explode(&graph, 0, Decimal::from(a));
        prop_assert!(separate.merge(explode(&graph, 0, Decimal::from(b))).is_ok());
        let together = explode(&graph, 0, Decimal::from(a + b));
        prop_assert_eq!(together, separate);
    }

    #[test]
    fn explosion_only_yields_positive_terminal_demand(
        edges in prop::collection::vec((0u8..8, 0u8..8, 1u32..500), 0..20),
        qty in 1i64..100,
    ) {
        let graph = layered_graph(&edges, 8);
        let requirements = explode(&graph, 0, Decimal::from(qty));
        prop_assert!(!requirements.is_empty());
        for (_, quantity) in requirements.iter() {
            prop_assert!(quantity > Decimal::ZERO);
        }
    }

    #[test]
    fn discounted_line_never_exceeds_list_amount(
        price_cents in 0i64..1_000_000,
        quantity in 1i64..1_000,
        discount in 0u32..=100,
    ) {
        let price = Decimal::new(price_cents, 2);
        let amount = line_final_amount(price, quantity, Decimal::from(discount), 2);
        prop_assert!(amount.is_some());
        let amount = amount.unwrap_or_default();
        prop_assert!(amount >= Decimal::ZERO);
        prop_assert!(amount <= price * Decimal::from(quantity));
    }

    #[test]
    fn tax_is_applied_on_top_of_additional_cost(
        revenue in 0i64..1_000_000,
        extra in 0i64..10_000,
    ) {
        let base = Decimal::from(revenue + extra);
        prop_assert_eq!(
            order_total_amount(Decimal::from(revenue), Decimal::from(extra), Decimal::ZERO, 0),
            Some(base)
        );
        prop_assert!(
            order_total_amount(Decimal::from(revenue), Decimal::from(extra), Decimal::from(10), 0)
                .is_some_and(|total| total >= base)
        );
    }
}
