mod common;

use axum::http::{Method, StatusCode};
use common::{json_body, TestApp};
use management_api::entities::product::OperationType;
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn resources_require_a_bearer_token() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/products", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let response = app
        .request(Method::GET, "/api/v1/products", None, Some("garbage"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn responses_use_the_success_envelope_and_echo_request_ids() {
    let app = TestApp::new().await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/categories",
            Some(json!({ "code": "FAB", "name": "Fabrics" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key("x-request-id"));

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["code"], "FAB");
    assert!(body["meta"]["timestamp"].is_string());
}

#[tokio::test]
async fn order_over_http_is_created_and_deducts_stock() {
    let app = TestApp::new().await;
    let sheet = app
        .seed_product("Sheet", dec!(10), OperationType::Purchase)
        .await;
    let boxed = app
        .seed_product("Box", dec!(12), OperationType::Manufacturing)
        .await;
    app.seed_bom(boxed, &[(sheet, dec!(2))]).await;
    app.set_stock(sheet, 10).await;
    let customer = app.seed_customer("Dung").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "customer_id": customer,
                "items": [{ "product_id": boxed, "quantity": 3, "selling_price": "25" }]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["code"]
        .as_str()
        .is_some_and(|code| code.starts_with("DH")));
    assert_eq!(body["data"]["created_by"], common::TEST_USER_ID);
    assert_eq!(app.stock(sheet).await, 4);

    let id = body["data"]["id"].as_i64().expect("order id");
    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/orders/{}", id), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn shortage_is_a_bad_request_with_details() {
    let app = TestApp::new().await;
    let sheet = app
        .seed_product("Sheet", dec!(10), OperationType::Purchase)
        .await;
    app.set_stock(sheet, 2).await;
    let customer = app.seed_customer("Dung").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "customer_id": customer,
                "items": [{ "product_id": sheet, "quantity": 5, "selling_price": "11" }]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVENTORY_QUANTITY_EXCEEDED");
    assert_eq!(body["error"]["details"]["product_id"], sheet);
    assert_eq!(body["error"]["details"]["shortfall"], 3);
    assert_eq!(app.stock(sheet).await, 2);
}

#[tokio::test]
async fn malformed_json_uses_the_error_envelope() {
    let app = TestApp::new().await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/orders",
            Some(json!({ "customer_id": "not-a-number" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn missing_resources_are_not_found() {
    let app = TestApp::new().await;
    let response = app
        .request_authenticated(Method::GET, "/api/v1/products/999", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn stale_inventory_version_is_a_conflict() {
    let app = TestApp::new().await;
    let sheet = app
        .seed_product("Sheet", dec!(10), OperationType::Purchase)
        .await;

    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/products/{}/inventory/quantity", sheet),
            Some(json!({ "quantity": 3, "version": "stale" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.stock(sheet).await, 0);
}

#[tokio::test]
async fn receipts_and_explosion_over_http() {
    let app = TestApp::new().await;
    let sheet = app
        .seed_product("Sheet", dec!(10), OperationType::Purchase)
        .await;
    let boxed = app
        .seed_product("Box", dec!(12), OperationType::Manufacturing)
        .await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/boms",
            Some(json!({
                "parent_product_id": boxed,
                "components": [{ "component_product_id": sheet, "quantity": "2.5" }]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/boms/explosion",
            Some(json!({ "parent_product_id": boxed, "quantity": "4" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["total_materials"], 1);
    assert_eq!(body["data"]["requirements"][0]["product"]["id"], sheet);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/inventory-receipts",
            Some(json!({ "items": [{ "product_id": sheet, "quantity": 12 }] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.stock(sheet).await, 12);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/inventory", None)
        .await;
    let body = json_body(response).await;
    let rows = body["data"].as_array().expect("inventory list");
    assert!(rows
        .iter()
        .any(|row| row["product"]["id"] == sheet && row["quantity"] == 12));
}

#[tokio::test]
async fn order_images_over_http() {
    let app = TestApp::new().await;
    let sheet = app
        .seed_product("Sheet", dec!(10), OperationType::Purchase)
        .await;
    app.set_stock(sheet, 3).await;
    let customer = app.seed_customer("Dung").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "customer_id": customer,
                "items": [{ "product_id": sheet, "quantity": 1, "selling_price": "15" }]
            })),
        )
        .await;
    let id = json_body(response).await["data"]["id"]
        .as_i64()
        .expect("order id");

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/orders/{}/images", id),
            Some(json!({ "image_key": "orders/receipt.jpg", "is_primary": true })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/orders/{}", id), None)
        .await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["images"][0]["image_key"], "orders/receipt.jpg");
    assert_eq!(body["data"]["images"][0]["is_primary"], true);
}
