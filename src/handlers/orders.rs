use axum::{
    extract::State,
    response::Response,
    routing::{delete, get},
    Router,
};
use tracing::info;

use super::common::{
    created_response, no_content_response, success_response, ApiJson, ApiPath, ApiQuery,
};
use crate::{
    auth::AuthUser,
    errors::ServiceError,
    handlers::AppState,
    services::{
        catalog::AddImageInput,
        orders::{CreateOrderInput, OrderFilter, UpdateOrderInput},
    },
};

/// Creates the router for order endpoints
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order).put(update_order))
        .route("/{id}/images", get(list_images).post(add_image))
        .route("/{id}/images/{image_id}", delete(delete_image))
}

/// Create an order; stock is deducted in the same transaction
async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CreateOrderInput>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.create_order(payload, &user).await?;
    info!(order_id = order.order.id, code = %order.order.code, "Order created via API");
    Ok(created_response(order))
}

async fn get_order(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.orders.get_order(id).await?))
}

async fn list_orders(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(filter): ApiQuery<OrderFilter>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.orders.list_orders(filter).await?))
}

async fn update_order(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateOrderInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.orders.update_order(id, payload).await?,
    ))
}

async fn list_images(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.orders.list_images(id).await?))
}

async fn add_image(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AddImageInput>,
) -> Result<Response, ServiceError> {
    let image = state.services.orders.add_image(id, payload).await?;
    Ok(created_response(image))
}

async fn delete_image(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath((id, image_id)): ApiPath<(i64, i64)>,
) -> Result<Response, ServiceError> {
    state.services.orders.delete_image(id, image_id).await?;
    Ok(no_content_response())
}
