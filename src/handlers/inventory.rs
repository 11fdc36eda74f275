use axum::{extract::State, response::Response, routing::get, Router};

use super::common::success_response;
use crate::{auth::AuthUser, errors::ServiceError, handlers::AppState};

/// Creates the router for ledger-wide inventory endpoints
pub fn inventory_routes() -> Router<AppState> {
    Router::new().route("/", get(list_inventory))
}

async fn list_inventory(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.inventory.list_inventory().await?,
    ))
}
