mod common;

use assert_matches::assert_matches;
use common::TestApp;
use management_api::{
    entities::{inventory_history::ReferenceType, product::OperationType},
    errors::ServiceError,
    repositories::InventoryRepository,
    services::receipts::{CreateReceiptInput, ReceiptItemInput},
};
use rust_decimal_macros::dec;

fn line(product_id: i64, quantity: i64) -> ReceiptItemInput {
    ReceiptItemInput {
        product_id,
        quantity,
        unit_cost: Some(dec!(2.5)),
        notes: None,
    }
}

#[tokio::test]
async fn receipt_adds_stock_and_records_history() {
    let app = TestApp::new().await;
    let button = app
        .seed_product("Button", dec!(1), OperationType::Purchase)
        .await;
    let zipper = app
        .seed_product("Zipper", dec!(2), OperationType::Purchase)
        .await;
    app.set_stock(button, 4).await;

    let receipt = app
        .state
        .services
        .receipts
        .create_receipt(
            CreateReceiptInput {
                receipt_date: None,
                notes: Some("weekly delivery".to_string()),
                items: vec![line(button, 10), line(zipper, 3)],
            },
            &app.actor(),
        )
        .await
        .unwrap();

    assert_eq!(receipt.receipt.code, format!("NK{:05}", receipt.receipt.id));
    assert_eq!(receipt.receipt.total_items, 2);
    assert_eq!(receipt.items.len(), 2);
    assert_eq!(app.stock(button).await, 14);
    assert_eq!(app.stock(zipper).await, 3);

    let history = app.state.services.inventory.histories(button).await.unwrap();
    let row = history
        .iter()
        .find(|row| row.reference_type == Some(ReferenceType::Receipt))
        .expect("receipt history row");
    assert_eq!(row.reference_id, Some(receipt.receipt.id));
    assert_eq!(row.quantity, 10);
    assert_eq!(row.final_quantity, 14);
}

#[tokio::test]
async fn receipt_creates_missing_inventory_row() {
    let app = TestApp::new().await;
    let lace = app
        .seed_product("Lace", dec!(1), OperationType::Purchase)
        .await;
    InventoryRepository::delete(&*app.state.db, lace).await.unwrap();
    assert!(InventoryRepository::find_by_product(&*app.state.db, lace)
        .await
        .unwrap()
        .is_none());

    app.receive(lace, 7).await;
    assert_eq!(app.stock(lace).await, 7);
}

#[tokio::test]
async fn receipt_lookup_by_code_and_listing() {
    let app = TestApp::new().await;
    let button = app
        .seed_product("Button", dec!(1), OperationType::Purchase)
        .await;
    app.receive(button, 1).await;
    app.receive(button, 2).await;

    let receipts = &app.state.services.receipts;
    let listed = receipts.list_receipts().await.unwrap();
    assert_eq!(listed.len(), 2);

    let code = listed[0].code.clone();
    let found = receipts.get_receipt_by_code(&code).await.unwrap();
    assert_eq!(found.receipt.code, code);
    assert_matches!(
        receipts.get_receipt_by_code("NK99999").await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn receipt_with_unknown_product_changes_nothing() {
    let app = TestApp::new().await;
    let button = app
        .seed_product("Button", dec!(1), OperationType::Purchase)
        .await;

    let err = app
        .state
        .services
        .receipts
        .create_receipt(
            CreateReceiptInput {
                receipt_date: None,
                notes: None,
                items: vec![line(button, 5), line(777, 1)],
            },
            &app.actor(),
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
    assert_eq!(app.stock(button).await, 0);
    assert!(app
        .state
        .services
        .receipts
        .list_receipts()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn receipt_rejects_non_positive_quantities() {
    let app = TestApp::new().await;
    let button = app
        .seed_product("Button", dec!(1), OperationType::Purchase)
        .await;

    let err = app
        .state
        .services
        .receipts
        .create_receipt(
            CreateReceiptInput {
                receipt_date: None,
                notes: None,
                items: vec![line(button, 0)],
            },
            &app.actor(),
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError { .. });
}

#[tokio::test]
async fn repeated_lines_accumulate_in_request_order() {
    let app = TestApp::new().await;
    let button = app
        .seed_product("Button", dec!(1), OperationType::Purchase)
        .await;
    let zipper = app
        .seed_product("Zipper", dec!(2), OperationType::Purchase)
        .await;
    app.set_stock(zipper, 1).await;

    app.state
        .services
        .receipts
        .create_receipt(
            CreateReceiptInput {
                receipt_date: None,
                notes: None,
                items: vec![line(zipper, 2), line(button, 4), line(zipper, 5)],
            },
            &app.actor(),
        )
        .await
        .unwrap();

    assert_eq!(app.stock(zipper).await, 8);
    assert_eq!(app.stock(button).await, 4);

    let history = app.state.services.inventory.histories(zipper).await.unwrap();
    let mut receipts: Vec<(i64, i64)> = history
        .iter()
        .filter(|row| row.reference_type == Some(ReferenceType::Receipt))
        .map(|row| (row.quantity, row.final_quantity))
        .collect();
    receipts.sort();
    assert_eq!(receipts, vec![(2, 3), (5, 8)]);
}

#[tokio::test]
async fn receipts_listing_products_in_opposite_order_both_apply() {
    let app = TestApp::new().await;
    let button = app
        .seed_product("Button", dec!(1), OperationType::Purchase)
        .await;
    let zipper = app
        .seed_product("Zipper", dec!(2), OperationType::Purchase)
        .await;
    let receipts = app.state.services.receipts.clone();
    let actor = app.actor();

    let forward = CreateReceiptInput {
        receipt_date: None,
        notes: None,
        items: vec![line(button, 1), line(zipper, 2)],
    };
    let backward = CreateReceiptInput {
        receipt_date: None,
        notes: None,
        items: vec![line(zipper, 3), line(button, 4)],
    };
    let (first, second) = tokio::join!(
        receipts.create_receipt(forward, &actor),
        receipts.create_receipt(backward, &actor),
    );
    first.unwrap();
    second.unwrap();

    assert_eq!(app.stock(button).await, 5);
    assert_eq!(app.stock(zipper).await, 5);
}

#[tokio::test]
async fn receipt_beyond_quantity_range_changes_nothing() {
    let app = TestApp::new().await;
    let button = app
        .seed_product("Button", dec!(1), OperationType::Purchase)
        .await;
    app.set_stock(button, 1).await;

    let receipts = &app.state.services.receipts;
    let err = receipts
        .create_receipt(
            CreateReceiptInput {
                receipt_date: None,
                notes: None,
                items: vec![line(button, i64::MAX)],
            },
            &app.actor(),
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));

    let err = receipts
        .create_receipt(
            CreateReceiptInput {
                receipt_date: None,
                notes: None,
                items: vec![line(button, i64::MAX), line(button, 1)],
            },
            &app.actor(),
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));

    assert_eq!(app.stock(button).await, 1);
    assert!(receipts.list_receipts().await.unwrap().is_empty());
}
