use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Structured detail attached to an inventory shortage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryShortage {
    pub product_id: i64,
    pub required: i64,
    pub available: i64,
    pub shortfall: i64,
}

impl InventoryShortage {
    pub fn new(product_id: i64, required: i64, available: i64) -> Self {
        Self {
            product_id,
            required,
            available,
            shortfall: required - available,
        }
    }
}

/// Error body carried inside the response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g. "NOT_FOUND", "INVENTORY_QUANTITY_EXCEEDED")
    pub code: String,
    /// Human-readable error description
    pub message: String,
    /// Input field that caused the error, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Structured payload, e.g. the shortage detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error envelope returned for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
    /// Unique request identifier for support and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {message}")]
    ValidationError {
        field: Option<String>,
        message: String,
    },

    #[error(
        "Insufficient inventory for product {}: required {}, available {}",
        .0.product_id,
        .0.required,
        .0.available
    )]
    InventoryQuantityExceeded(InventoryShortage),

    #[error("Invalid bill of materials: {0}")]
    InvalidBom(String),

    #[error("Concurrent modification of inventory for product {0}")]
    ConcurrentModification(i64),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        let field = err.field_errors().keys().next().map(|f| f.to_string());
        ServiceError::ValidationError {
            field,
            message: err.to_string(),
        }
    }
}

pub trait IntoDbErr {
    fn into_db_err(self) -> DbErr;
}

impl IntoDbErr for DbErr {
    fn into_db_err(self) -> DbErr {
        self
    }
}

impl IntoDbErr for String {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self)
    }
}

impl IntoDbErr for &str {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self.to_string())
    }
}

impl ServiceError {
    /// Generic constructor that normalizes any supported database error input.
    pub fn db_error<E: IntoDbErr>(error: E) -> Self {
        ServiceError::DatabaseError(error.into_db_err())
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::ValidationError {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Stable error code exposed to API callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DatabaseError(_) => "DB_DOWN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) | Self::ValidationError { .. } | Self::InvalidBom(_) => {
                "BAD_REQUEST"
            }
            Self::InventoryQuantityExceeded(_) => "INVENTORY_QUANTITY_EXCEEDED",
            Self::ConcurrentModification(_) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Timeout(_) => "TIMEOUT",
            Self::InternalError(_) | Self::Other(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) | Self::InternalError(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_)
            | Self::ValidationError { .. }
            | Self::InvalidBom(_)
            | Self::InventoryQuantityExceeded(_) => StatusCode::BAD_REQUEST,
            Self::ConcurrentModification(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database unavailable".to_string(),
            Self::InternalError(_) | Self::Other(_) => "Internal server error".to_string(),
            Self::Timeout(_) => "Operation timed out".to_string(),
            _ => self.to_string(),
        }
    }

    fn field(&self) -> Option<String> {
        match self {
            Self::ValidationError { field, .. } => field.clone(),
            _ => None,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InventoryQuantityExceeded(shortage) => serde_json::to_value(shortage).ok(),
            _ => None,
        }
    }
}

/// Logs a storage failure with the operation that produced it and maps it
/// to `DB_DOWN`.
pub fn storage_error(operation: &'static str) -> impl FnOnce(DbErr) -> ServiceError {
    move |err| {
        tracing::error!(operation, error = %err, "Storage operation failed");
        ServiceError::DatabaseError(err)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        }

        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.response_message(),
                field: self.field(),
                details: self.details(),
            },
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}
