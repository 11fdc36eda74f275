mod common;

use assert_matches::assert_matches;
use common::TestApp;
use management_api::{
    entities::{inventory_history::ReferenceType, product::OperationType},
    errors::ServiceError,
    services::{
        catalog::AddImageInput,
        orders::{CreateOrderInput, OrderFilter, OrderItemInput, UpdateOrderInput},
    },
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(product_id: i64, quantity: i64, selling_price: Decimal) -> OrderItemInput {
    OrderItemInput {
        product_id,
        quantity,
        selling_price,
        original_price: None,
        discount_percent: Decimal::ZERO,
    }
}

fn order(customer_id: i64, items: Vec<OrderItemInput>) -> CreateOrderInput {
    CreateOrderInput {
        customer_id,
        order_date: None,
        note: None,
        additional_cost: Decimal::ZERO,
        additional_cost_note: None,
        tax_percent: Decimal::ZERO,
        items,
    }
}

/// Finished good `P` built from one unit of purchased material `M`.
async fn kit(app: &TestApp, stock: i64) -> (i64, i64, i64) {
    let material = app
        .seed_product("Sheet", dec!(10), OperationType::Purchase)
        .await;
    let finished = app
        .seed_product("Box", dec!(12), OperationType::Manufacturing)
        .await;
    app.seed_bom(finished, &[(material, dec!(1))]).await;
    app.set_stock(material, stock).await;
    let customer = app.seed_customer("Anh").await;
    (finished, material, customer)
}

#[tokio::test]
async fn order_consumes_exactly_the_available_stock() {
    let app = TestApp::new().await;
    let (finished, material, customer) = kit(&app, 5).await;

    let created = app
        .state
        .services
        .orders
        .create_order(order(customer, vec![item(finished, 5, dec!(20))]), &app.actor())
        .await
        .expect("order within stock succeeds");

    assert_eq!(created.order.code, format!("DH{:05}", created.order.id));
    assert_eq!(created.items.len(), 1);
    assert_eq!(created.order.total_sales_revenue, dec!(100));
    assert_eq!(created.order.total_original_cost, dec!(60));
    assert_eq!(app.stock(material).await, 0);
    // The finished good itself is not stocked, only its material is.
    assert_eq!(app.stock(finished).await, 0);
}

#[tokio::test]
async fn order_beyond_stock_reports_the_shortfall() {
    let app = TestApp::new().await;
    let (finished, material, customer) = kit(&app, 5).await;

    let err = app
        .state
        .services
        .orders
        .create_order(order(customer, vec![item(finished, 6, dec!(20))]), &app.actor())
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::InventoryQuantityExceeded(shortage) => {
        assert_eq!(shortage.product_id, material);
        assert_eq!(shortage.required, 6);
        assert_eq!(shortage.available, 5);
        assert_eq!(shortage.shortfall, 1);
    });
    assert_eq!(app.stock(material).await, 5);
}

#[tokio::test]
async fn failed_order_leaves_no_trace() {
    let app = TestApp::new().await;
    let (finished, material, customer) = kit(&app, 5).await;
    let glue = app
        .seed_product("Glue", dec!(1), OperationType::Purchase)
        .await;
    app.set_stock(glue, 1).await;

    let err = app
        .state
        .services
        .orders
        .create_order(
            order(
                customer,
                vec![item(finished, 2, dec!(20)), item(glue, 3, dec!(2))],
            ),
            &app.actor(),
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InventoryQuantityExceeded(_));

    let orders = app
        .state
        .services
        .orders
        .list_orders(OrderFilter::default())
        .await
        .unwrap();
    assert!(orders.is_empty());
    assert_eq!(app.stock(material).await, 5);
    assert_eq!(app.stock(glue).await, 1);

    let history = app.state.services.inventory.histories(material).await.unwrap();
    assert!(history
        .iter()
        .all(|row| row.reference_type != Some(ReferenceType::Order)));
}

#[tokio::test]
async fn shared_material_is_summed_across_lines() {
    let app = TestApp::new().await;
    let (finished, material, customer) = kit(&app, 5).await;

    // 3 boxes plus 3 loose sheets need 6 sheets in total.
    let err = app
        .state
        .services
        .orders
        .create_order(
            order(
                customer,
                vec![item(finished, 3, dec!(20)), item(material, 3, dec!(15))],
            ),
            &app.actor(),
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InventoryQuantityExceeded(shortage) => {
        assert_eq!(shortage.required, 6);
    });
}

#[tokio::test]
async fn fractional_requirements_round_up_to_whole_units() {
    let app = TestApp::new().await;
    let thread = app
        .seed_product("Thread", dec!(1), OperationType::Purchase)
        .await;
    let patch = app
        .seed_product("Patch", dec!(3), OperationType::Manufacturing)
        .await;
    app.seed_bom(patch, &[(thread, dec!(0.3))]).await;
    app.set_stock(thread, 10).await;
    let customer = app.seed_customer("Binh").await;

    app.state
        .services
        .orders
        .create_order(order(customer, vec![item(patch, 5, dec!(4))]), &app.actor())
        .await
        .unwrap();

    // 5 x 0.3 = 1.5 is taken as 2.
    assert_eq!(app.stock(thread).await, 8);
}

#[tokio::test]
async fn history_rows_reference_the_order() {
    let app = TestApp::new().await;
    let (finished, material, customer) = kit(&app, 5).await;

    let created = app
        .state
        .services
        .orders
        .create_order(order(customer, vec![item(finished, 2, dec!(20))]), &app.actor())
        .await
        .unwrap();

    let history = app.state.services.inventory.histories(material).await.unwrap();
    let latest = history
        .iter()
        .find(|row| row.reference_type == Some(ReferenceType::Order))
        .expect("order history row");
    assert_eq!(latest.reference_id, Some(created.order.id));
    assert_eq!(latest.quantity, -2);
    assert_eq!(latest.final_quantity, 3);
    assert_eq!(latest.final_quantity, app.stock(material).await);
    assert_eq!(latest.actor_id, common::TEST_USER_ID);
    assert_eq!(latest.actor_name, common::TEST_USER_NAME);
}

#[tokio::test]
async fn concurrent_orders_for_the_last_units_have_one_winner() {
    let app = TestApp::new().await;
    let (finished, material, customer) = kit(&app, 5).await;
    let orders = app.state.services.orders.clone();
    let actor = app.actor();

    let (first, second) = tokio::join!(
        orders.create_order(order(customer, vec![item(finished, 5, dec!(20))]), &actor),
        orders.create_order(order(customer, vec![item(finished, 5, dec!(20))]), &actor),
    );

    let successes = [first.is_ok(), second.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(successes, 1);
    let loser = first.err().or(second.err()).expect("one order must fail");
    assert_matches!(
        loser,
        ServiceError::InventoryQuantityExceeded(shortage)
            if shortage.product_id == material
                && shortage.required == 5
                && shortage.available == 0
                && shortage.shortfall == 5
    );
    assert_eq!(app.stock(material).await, 0);

    let placed = orders.list_orders(OrderFilter::default()).await.unwrap();
    assert_eq!(placed.len(), 1);
    let history = app.state.services.inventory.histories(material).await.unwrap();
    let order_rows: Vec<_> = history
        .iter()
        .filter(|row| row.reference_type == Some(ReferenceType::Order))
        .collect();
    assert_eq!(order_rows.len(), 1);
    assert_eq!(order_rows[0].reference_id, Some(placed[0].order.id));
    assert_eq!(order_rows[0].quantity, -5);
}

#[tokio::test]
async fn amounts_beyond_decimal_range_are_rejected_without_writes() {
    let app = TestApp::new().await;
    let (finished, material, customer) = kit(&app, 5).await;

    let err = app
        .state
        .services
        .orders
        .create_order(order(customer, vec![item(finished, 2, Decimal::MAX)]), &app.actor())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));
    assert_eq!(app.stock(material).await, 5);
    assert!(app
        .state
        .services
        .orders
        .list_orders(OrderFilter::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn order_images_are_listed_with_the_order() {
    let app = TestApp::new().await;
    let (finished, _, customer) = kit(&app, 5).await;
    let orders = &app.state.services.orders;
    let created = orders
        .create_order(order(customer, vec![item(finished, 1, dec!(20))]), &app.actor())
        .await
        .unwrap();
    let id = created.order.id;
    assert!(created.images.is_empty());

    let first = orders
        .add_image(
            id,
            AddImageInput {
                image_key: "orders/1/front.jpg".to_string(),
                is_primary: true,
            },
        )
        .await
        .unwrap();
    let second = orders
        .add_image(
            id,
            AddImageInput {
                image_key: "orders/1/back.jpg".to_string(),
                is_primary: true,
            },
        )
        .await
        .unwrap();

    let detail = orders.get_order(id).await.unwrap();
    assert_eq!(detail.images.len(), 2);
    assert_eq!(detail.images[0].id, second.id);
    assert!(detail.images[0].is_primary);
    assert!(!detail.images[1].is_primary);

    orders.delete_image(id, first.id).await.unwrap();
    assert_eq!(orders.list_images(id).await.unwrap().len(), 1);
    assert_matches!(
        orders.delete_image(id, first.id).await,
        Err(ServiceError::NotFound(_))
    );
    assert_matches!(
        orders
            .add_image(
                9_999,
                AddImageInput {
                    image_key: "orders/missing.jpg".to_string(),
                    is_primary: false,
                },
            )
            .await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn unknown_customer_is_rejected_before_any_write() {
    let app = TestApp::new().await;
    let (finished, material, _) = kit(&app, 5).await;

    let err = app
        .state
        .services
        .orders
        .create_order(order(9_999, vec![item(finished, 1, dec!(20))]), &app.actor())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
    assert_eq!(app.stock(material).await, 5);
}

#[tokio::test]
async fn totals_and_profit_are_derived_from_items() {
    let app = TestApp::new().await;
    let (finished, _, customer) = kit(&app, 10).await;

    let mut input = order(
        customer,
        vec![OrderItemInput {
            discount_percent: dec!(10),
            ..item(finished, 2, dec!(50))
        }],
    );
    input.additional_cost = dec!(10);
    input.tax_percent = dec!(10);

    let created = app
        .state
        .services
        .orders
        .create_order(input, &app.actor())
        .await
        .unwrap();

    // 2 x 50 less 10% = 90; (90 + 10) plus 10% tax = 110.
    assert_eq!(created.items[0].item.final_amount, dec!(90));
    assert_eq!(created.total_amount, dec!(110));
    // 90 + 10 - 24
    assert_eq!(created.profit_loss, dec!(76));
}

#[tokio::test]
async fn header_update_keeps_items_and_stock() {
    let app = TestApp::new().await;
    let (finished, material, customer) = kit(&app, 5).await;
    let other = app.seed_customer("Chi").await;

    let created = app
        .state
        .services
        .orders
        .create_order(order(customer, vec![item(finished, 1, dec!(20))]), &app.actor())
        .await
        .unwrap();

    let updated = app
        .state
        .services
        .orders
        .update_order(
            created.order.id,
            UpdateOrderInput {
                customer_id: Some(other),
                note: Some("deliver friday".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.order.customer_id, other);
    assert_eq!(updated.order.note.as_deref(), Some("deliver friday"));
    assert_eq!(updated.items.len(), 1);
    assert_eq!(app.stock(material).await, 4);

    let by_customer = app
        .state
        .services
        .orders
        .list_orders(OrderFilter {
            customer_id: Some(other),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_customer.len(), 1);
    assert_eq!(by_customer[0].product_count, 1);
}
