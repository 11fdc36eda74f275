#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use management_api::{
    app_router,
    auth::AuthUser,
    config::AppConfig,
    db,
    entities::product::OperationType,
    services::{
        bom::{BomComponentInput, ReplaceBomInput},
        catalog::CreateProductInput,
        customers::CreateCustomerInput,
        inventory::AdjustQuantityInput,
        receipts::{CreateReceiptInput, ReceiptItemInput},
    },
    AppState,
};

pub const TEST_USER_ID: &str = "user-1";
pub const TEST_USER_NAME: &str = "Test User";

/// Helper harness for spinning up an application state backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    token: String,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // One connection keeps the in-memory database alive and shared.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let token = state
            .auth
            .issue_token(TEST_USER_ID, Some(TEST_USER_NAME))
            .expect("issue test token");
        let router = app_router(state.clone());

        Self {
            router,
            state,
            token,
        }
    }

    /// Access the bearer token for the default user.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The actor the default token resolves to.
    pub fn actor(&self) -> AuthUser {
        AuthUser {
            user_id: TEST_USER_ID.to_string(),
            name: Some(TEST_USER_NAME.to_string()),
        }
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for authenticated JSON requests.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        self.request(method, uri, body, Some(self.token())).await
    }

    pub async fn seed_product(&self, name: &str, cost: Decimal, operation_type: OperationType) -> i64 {
        self.state
            .services
            .catalog
            .create_product(CreateProductInput {
                name: name.to_string(),
                cost,
                category_id: None,
                unit_id: None,
                description: None,
                operation_type,
            })
            .await
            .expect("seed product for tests")
            .id
    }

    pub async fn seed_customer(&self, name: &str) -> i64 {
        self.state
            .services
            .customers
            .create_customer(CreateCustomerInput {
                name: name.to_string(),
                phone: None,
                address: None,
            })
            .await
            .expect("seed customer for tests")
            .id
    }

    pub async fn seed_bom(&self, parent: i64, components: &[(i64, Decimal)]) {
        self.state
            .services
            .bom
            .replace_bom(ReplaceBomInput {
                parent_product_id: parent,
                components: components
                    .iter()
                    .map(|&(component_product_id, quantity)| BomComponentInput {
                        component_product_id,
                        quantity,
                    })
                    .collect(),
            })
            .await
            .expect("seed bom for tests");
    }

    /// Brings on-hand stock of `product_id` to exactly `quantity`.
    pub async fn set_stock(&self, product_id: i64, quantity: i64) {
        let inventory = &self.state.services.inventory;
        let current = inventory
            .get_by_product(product_id)
            .await
            .expect("inventory row for seeded product");
        inventory
            .adjust_quantity(
                product_id,
                AdjustQuantityInput {
                    quantity,
                    version: current.version,
                    note: Some("test setup".to_string()),
                },
                &self.actor(),
            )
            .await
            .expect("set stock for tests");
    }

    pub async fn receive(&self, product_id: i64, quantity: i64) {
        self.state
            .services
            .receipts
            .create_receipt(
                CreateReceiptInput {
                    receipt_date: None,
                    notes: None,
                    items: vec![ReceiptItemInput {
                        product_id,
                        quantity,
                        unit_cost: None,
                        notes: None,
                    }],
                },
                &self.actor(),
            )
            .await
            .expect("receive stock for tests");
    }

    pub async fn stock(&self, product_id: i64) -> i64 {
        self.state
            .services
            .inventory
            .get_by_product(product_id)
            .await
            .map(|row| row.quantity)
            .unwrap_or(0)
    }
}

/// Collects a response body as JSON.
pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is json")
}
