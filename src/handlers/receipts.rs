use axum::{extract::State, response::Response, routing::get, Router};
use tracing::info;

use super::common::{created_response, success_response, ApiJson, ApiPath};
use crate::{
    auth::AuthUser, errors::ServiceError, handlers::AppState,
    services::receipts::CreateReceiptInput,
};

/// Creates the router for inventory receipt endpoints
pub fn receipt_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_receipts).post(create_receipt))
        .route("/{id}", get(get_receipt))
        .route("/code/{code}", get(get_receipt_by_code))
}

async fn create_receipt(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CreateReceiptInput>,
) -> Result<Response, ServiceError> {
    let receipt = state
        .services
        .receipts
        .create_receipt(payload, &user)
        .await?;
    info!(receipt_id = receipt.receipt.id, code = %receipt.receipt.code, "Receipt created via API");
    Ok(created_response(receipt))
}

async fn list_receipts(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.receipts.list_receipts().await?))
}

async fn get_receipt(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.receipts.get_receipt(id).await?))
}

async fn get_receipt_by_code(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(code): ApiPath<String>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.receipts.get_receipt_by_code(&code).await?,
    ))
}
