use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::dto::{CheapestParams, ListProductsParams};
use crate::app::errors::{self, ErrorCode};
use crate::app::services::AppServices;

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<ListProductsParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(e) => return invalid_query(e),
    };
    let query = params.into_query();

    match services.products_list(&query) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list products");
            errors::product_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ListProducts,
                e.to_string(),
            )
        }
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = id.trim();
    if id.is_empty() {
        return missing_product_id().await;
    }

    match services.products_get(id) {
        Ok(Some(product)) => (StatusCode::OK, Json(product)).into_response(),
        Ok(None) => errors::product_error(
            StatusCode::NOT_FOUND,
            ErrorCode::NotFound,
            "Product not found",
        ),
        Err(e) => {
            tracing::error!(error = %e, product_id = id, "failed to get product");
            errors::product_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::GetProduct,
                e.to_string(),
            )
        }
    }
}

/// `GET /api/products/` with nothing after the slash.
pub async fn missing_product_id() -> axum::response::Response {
    errors::product_error(
        StatusCode::BAD_REQUEST,
        ErrorCode::InvalidParameter,
        "Product id is required",
    )
}

pub async fn cheapest_products(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<CheapestParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(e) => return invalid_query(e),
    };

    match services.products_cheapest(params.top_n()) {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to compute cheapest products");
            errors::product_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ListProducts,
                e.to_string(),
            )
        }
    }
}

fn invalid_query(rejection: QueryRejection) -> axum::response::Response {
    errors::product_error(
        StatusCode::BAD_REQUEST,
        ErrorCode::InvalidParameter,
        rejection.body_text(),
    )
}

pub async fn catalog_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products_stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to compute catalog stats");
            errors::product_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::ListProducts,
                e.to_string(),
            )
        }
    }
}
