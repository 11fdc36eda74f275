use axum::{extract::State, response::Response, routing::get, Router};

use super::common::{created_response, success_response, ApiJson, ApiPath, ApiQuery};
use crate::{
    auth::AuthUser,
    errors::ServiceError,
    handlers::AppState,
    services::customers::{CreateCustomerInput, CustomerFilter, UpdateCustomerInput},
};

/// Creates the router for customer endpoints
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/{id}", get(get_customer).put(update_customer))
}

async fn list_customers(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(filter): ApiQuery<CustomerFilter>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.customers.list_customers(filter).await?,
    ))
}

async fn create_customer(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(payload): ApiJson<CreateCustomerInput>,
) -> Result<Response, ServiceError> {
    let customer = state.services.customers.create_customer(payload).await?;
    Ok(created_response(customer))
}

async fn get_customer(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.customers.get_customer(id).await?,
    ))
}

async fn update_customer(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateCustomerInput>,
) -> Result<Response, ServiceError> {
    let customer = state.services.customers.update_customer(id, payload).await?;
    Ok(success_response(customer))
}
