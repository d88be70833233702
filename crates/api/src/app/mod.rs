//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: catalog operations used by the handlers
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query-string DTOs and their mapping to catalog queries
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use storefront_catalog::CatalogStore;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(store: Arc<dyn CatalogStore>, config: &AppConfig) -> Router {
    let services = Arc::new(services::AppServices::new(store));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .nest_service("/images", ServeDir::new(&config.images_dir))
        .fallback(errors::not_found)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(cors)
                .layer(CatchPanicLayer::custom(errors::panic_response)),
        )
}
