use axum::{routing::get, Router};

pub mod products;
pub mod system;

/// Router for the catalog API.
///
/// Routes are registered with full paths: `/api/products` and
/// `/api/products/` are different endpoints (the second one is an empty id).
pub fn router() -> Router {
    Router::new()
        .route("/api/products", get(products::list_products))
        .route("/api/products/", get(products::missing_product_id))
        .route("/api/products/cheapest", get(products::cheapest_products))
        .route("/api/products/stats", get(products::catalog_stats))
        .route("/api/products/:id", get(products::get_product))
}
