use axum::{
    extract::State,
    response::Response,
    routing::get,
    Router,
};

use super::common::{created_response, success_response, ApiJson, ApiPath};
use crate::{
    auth::AuthUser,
    errors::ServiceError,
    handlers::AppState,
    services::catalog::{CreateCodeNameInput, UpdateCodeNameInput},
};

/// Creates the router for category endpoints
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/{id}", get(get_category).put(update_category))
        .route("/code/{code}", get(get_category_by_code))
}

/// Creates the router for unit-of-measure endpoints
pub fn unit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_units).post(create_unit))
        .route("/{id}", get(get_unit).put(update_unit))
        .route("/code/{code}", get(get_unit_by_code))
}

async fn list_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Response, ServiceError> {
    let categories = state.services.catalog.list_categories().await?;
    Ok(success_response(categories))
}

async fn create_category(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(payload): ApiJson<CreateCodeNameInput>,
) -> Result<Response, ServiceError> {
    let category = state.services.catalog.create_category(payload).await?;
    Ok(created_response(category))
}

async fn get_category(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.catalog.get_category(id).await?))
}

async fn get_category_by_code(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(code): ApiPath<String>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.catalog.get_category_by_code(&code).await?,
    ))
}

async fn update_category(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateCodeNameInput>,
) -> Result<Response, ServiceError> {
    let category = state.services.catalog.update_category(id, payload).await?;
    Ok(success_response(category))
}

async fn list_units(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.catalog.list_units().await?))
}

async fn create_unit(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(payload): ApiJson<CreateCodeNameInput>,
) -> Result<Response, ServiceError> {
    let unit = state.services.catalog.create_unit(payload).await?;
    Ok(created_response(unit))
}

async fn get_unit(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.catalog.get_unit(id).await?))
}

async fn get_unit_by_code(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(code): ApiPath<String>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.catalog.get_unit_by_code(&code).await?,
    ))
}

async fn update_unit(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateCodeNameInput>,
) -> Result<Response, ServiceError> {
    let unit = state.services.catalog.update_unit(id, payload).await?;
    Ok(success_response(unit))
}
