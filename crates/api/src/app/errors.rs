use std::any::Any;

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use serde_json::json;

/// Product error codes returned in `error_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    CreateProduct,
    ListProducts,
    GetProduct,
    InvalidParameter,
    NotFound,
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::CreateProduct => "2001",
            ErrorCode::ListProducts => "2002",
            ErrorCode::GetProduct => "2003",
            ErrorCode::InvalidParameter => "4001",
            ErrorCode::NotFound => "4041",
            ErrorCode::Internal => "5001",
        }
    }

    /// Stable, client-facing message for the code.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::CreateProduct => "Error creating product",
            ErrorCode::ListProducts => "Error listing products",
            ErrorCode::GetProduct => "Error getting product",
            ErrorCode::InvalidParameter => "Invalid parameter",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::Internal => "Internal server error",
        }
    }
}

/// `{ error, error_detail, error_code }` body used by the product endpoints.
pub fn product_error(
    status: StatusCode,
    code: ErrorCode,
    detail: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code.message(),
            "error_detail": detail.into(),
            "error_code": code.as_str(),
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    error: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": error,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({
            "error": "Not found",
            "message": "Endpoint not found",
            "path": uri.to_string(),
        })),
    )
        .into_response()
}

/// Turn a handler panic into a generic 500. The panic payload is logged, never returned.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");

    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        "Something went wrong on the server",
    )
}
