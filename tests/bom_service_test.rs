mod common;

use assert_matches::assert_matches;
use common::TestApp;
use management_api::{
    entities::product::OperationType,
    errors::ServiceError,
    services::bom::{BomComponentInput, ExplosionInput, ReplaceBomInput},
};
use rust_decimal_macros::dec;

/// A -> {B: 2, C: 1}, B -> {C: 3}; C is purchased.
async fn layered(app: &TestApp) -> (i64, i64, i64) {
    let c = app
        .seed_product("Fabric", dec!(5), OperationType::Purchase)
        .await;
    let b = app
        .seed_product("Panel", dec!(8), OperationType::Packaging)
        .await;
    let a = app
        .seed_product("Jacket", dec!(40), OperationType::Manufacturing)
        .await;
    app.seed_bom(b, &[(c, dec!(3))]).await;
    app.seed_bom(a, &[(b, dec!(2)), (c, dec!(1))]).await;
    (a, b, c)
}

#[tokio::test]
async fn explosion_sums_converging_paths() {
    let app = TestApp::new().await;
    let (a, b, c) = layered(&app).await;

    let result = app
        .state
        .services
        .bom
        .explode(ExplosionInput {
            parent_product_id: a,
            quantity: dec!(1),
        })
        .await
        .unwrap();

    assert_eq!(result.parent.id, a);
    assert_eq!(result.total_materials, 1);
    assert_eq!(result.requirements[0].product.id, c);
    assert_eq!(result.requirements[0].quantity, dec!(7));
    assert!(result.requirements.iter().all(|line| line.product.id != b));
}

#[tokio::test]
async fn explosion_scales_with_quantity() {
    let app = TestApp::new().await;
    let (a, _, c) = layered(&app).await;

    let result = app
        .state
        .services
        .bom
        .explode(ExplosionInput {
            parent_product_id: a,
            quantity: dec!(3),
        })
        .await
        .unwrap();
    assert_eq!(result.requirements[0].product.id, c);
    assert_eq!(result.requirements[0].quantity, dec!(21));
}

#[tokio::test]
async fn replacing_with_a_cycle_is_rejected_and_rolled_back() {
    let app = TestApp::new().await;
    let (a, b, c) = layered(&app).await;

    let err = app
        .state
        .services
        .bom
        .replace_bom(ReplaceBomInput {
            parent_product_id: b,
            components: vec![BomComponentInput {
                component_product_id: a,
                quantity: dec!(1),
            }],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidBom(_));

    let kept = app.state.services.bom.get_by_parent(b).await.unwrap();
    assert_eq!(kept.components.len(), 1);
    assert_eq!(kept.components[0].component.id, c);
}

#[tokio::test]
async fn self_reference_and_duplicates_are_rejected() {
    let app = TestApp::new().await;
    let (a, b, _) = layered(&app).await;
    let bom = &app.state.services.bom;

    let err = bom
        .replace_bom(ReplaceBomInput {
            parent_product_id: a,
            components: vec![BomComponentInput {
                component_product_id: a,
                quantity: dec!(1),
            }],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidBom(_));

    let err = bom
        .replace_bom(ReplaceBomInput {
            parent_product_id: a,
            components: vec![
                BomComponentInput {
                    component_product_id: b,
                    quantity: dec!(1),
                },
                BomComponentInput {
                    component_product_id: b,
                    quantity: dec!(2),
                },
            ],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidBom(_));

    let err = bom
        .replace_bom(ReplaceBomInput {
            parent_product_id: a,
            components: vec![BomComponentInput {
                component_product_id: b,
                quantity: dec!(0),
            }],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError { .. });
}

#[tokio::test]
async fn usages_and_deletion() {
    let app = TestApp::new().await;
    let (a, b, c) = layered(&app).await;
    let bom = &app.state.services.bom;

    let mut parents: Vec<i64> = bom
        .get_by_component(c)
        .await
        .unwrap()
        .into_iter()
        .map(|usage| usage.parent.id)
        .collect();
    parents.sort_unstable();
    assert_eq!(parents, vec![a.min(b), a.max(b)]);

    assert_eq!(bom.get_all().await.unwrap().len(), 2);

    bom.delete_by_parent(a).await.unwrap();
    assert_matches!(bom.get_by_parent(a).await, Err(ServiceError::NotFound(_)));
    assert_matches!(bom.delete_by_parent(a).await, Err(ServiceError::NotFound(_)));
    assert_eq!(bom.get_by_component(c).await.unwrap().len(), 1);
}

#[tokio::test]
async fn explosion_of_unknown_product_is_not_found() {
    let app = TestApp::new().await;
    let err = app
        .state
        .services
        .bom
        .explode(ExplosionInput {
            parent_product_id: 404,
            quantity: dec!(1),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}
