use axum::{
    extract::State,
    response::Response,
    routing::{delete, get, put},
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
        catalog::{AddImageInput, CreateProductInput, ProductFilter, UpdateProductInput},
        inventory::AdjustQuantityInput,
    },
};

/// Creates the router for product endpoints, including per-product
/// inventory and image metadata
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/images", get(list_images).post(add_image))
        .route("/{id}/images/{image_id}", delete(delete_image))
        .route("/{id}/inventory", get(get_inventory))
        .route("/{id}/inventory/histories", get(get_histories))
        .route("/{id}/inventory/quantity", put(adjust_quantity))
}

async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(filter): ApiQuery<ProductFilter>,
) -> Result<Response, ServiceError> {
    let products = state.services.catalog.list_products(filter).await?;
    Ok(success_response(products))
}

async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CreateProductInput>,
) -> Result<Response, ServiceError> {
    let product = state.services.catalog.create_product(payload).await?;
    info!(product_id = product.id, user_id = %user.user_id, "Product created via API");
    Ok(created_response(product))
}

async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.catalog.get_product(id).await?))
}

async fn update_product(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateProductInput>,
) -> Result<Response, ServiceError> {
    let product = state.services.catalog.update_product(id, payload).await?;
    Ok(success_response(product))
}

async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    state.services.catalog.delete_product(id).await?;
    info!(product_id = id, user_id = %user.user_id, "Product deleted via API");
    Ok(no_content_response())
}

async fn list_images(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.catalog.list_images(id).await?))
}

async fn add_image(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AddImageInput>,
) -> Result<Response, ServiceError> {
    let image = state.services.catalog.add_image(id, payload).await?;
    Ok(created_response(image))
}

async fn delete_image(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath((id, image_id)): ApiPath<(i64, i64)>,
) -> Result<Response, ServiceError> {
    state.services.catalog.delete_image(id, image_id).await?;
    Ok(no_content_response())
}

async fn get_inventory(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.inventory.get_by_product(id).await?,
    ))
}

async fn get_histories(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.inventory.histories(id).await?))
}

async fn adjust_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AdjustQuantityInput>,
) -> Result<Response, ServiceError> {
    let inventory = state
        .services
        .inventory
        .adjust_quantity(id, payload, &user)
        .await?;
    Ok(success_response(inventory))
}
