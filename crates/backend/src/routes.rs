use axum::{http::Method, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::dashboards::d100_city_sales::service::SalesService;
use crate::system::middleware::request_logger::request_logger;

/// Конфигурация всех роутов приложения
pub fn configure_routes(service: Arc<SalesService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D100 SALES BY CITY
        // ========================================
        .route(
            "/api/data/sales-by-city/:year",
            get(handlers::d100_city_sales::get_sales_by_city),
        )
        .route(
            "/api/data/metadata",
            get(handlers::d100_city_sales::get_metadata),
        )
        .route(
            "/api/data/comparison",
            get(handlers::d100_city_sales::get_sales_comparison),
        )
        .with_state(service)
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}
