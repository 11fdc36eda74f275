use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Router,
};
use tracing::info;

use super::common::{created_response, no_content_response, success_response, ApiJson, ApiPath};
use crate::{
    auth::AuthUser,
    errors::ServiceError,
    handlers::AppState,
    services::bom::{ExplosionInput, ReplaceBomInput},
};

/// Creates the router for BOM endpoints
pub fn bom_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_boms).post(create_bom).put(update_bom))
        .route("/parent/{id}", get(get_by_parent).delete(delete_by_parent))
        .route("/component/{id}", get(get_by_component))
        .route("/explosion", post(explode))
}

async fn list_boms(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.bom.get_all().await?))
}

/// Create or replace the component set of a parent
async fn create_bom(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<ReplaceBomInput>,
) -> Result<Response, ServiceError> {
    let bom = state.services.bom.replace_bom(payload).await?;
    info!(parent = bom.parent.id, user_id = %user.user_id, "BOM stored via API");
    Ok(created_response(bom))
}

async fn update_bom(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(payload): ApiJson<ReplaceBomInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.bom.replace_bom(payload).await?))
}

async fn get_by_parent(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.bom.get_by_parent(id).await?))
}

async fn get_by_component(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.bom.get_by_component(id).await?,
    ))
}

async fn delete_by_parent(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    state.services.bom.delete_by_parent(id).await?;
    Ok(no_content_response())
}

async fn explode(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(payload): ApiJson<ExplosionInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.bom.explode(payload).await?))
}
