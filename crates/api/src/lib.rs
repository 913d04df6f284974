//! HTTP API server for the storefront user, order, and catalog services.
//!
//! Each service is mounted under its own prefix (`/user-service`,
//! `/order-service`, `/catalog-service`) so the three can run in one binary
//! or be split behind a gateway. Structured logging via tracing, Prometheus
//! metrics at `/metrics`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::{AppState, Backends, create_state, create_state_with_client};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let user_service = Router::new()
        .route("/health-check", get(routes::health::user_service))
        .route("/welcome", get(routes::users::welcome))
        .route(
            "/users",
            get(routes::users::list).post(routes::users::create),
        )
        .route("/users/{user_id}", get(routes::users::get));

    let order_service = Router::new()
        .route("/health-check", get(routes::health::order_service))
        .route(
            "/{user_id}/orders",
            get(routes::orders::list_for_user).post(routes::orders::create),
        )
        .route("/orders/{order_id}", get(routes::orders::get));

    let catalog_service = Router::new()
        .route("/health-check", get(routes::health::catalog_service))
        .route("/catalogs", get(routes::catalogs::list));

    Router::new()
        .route("/health-check", get(routes::health::check))
        .nest("/user-service", user_service)
        .nest("/order-service", order_service)
        .nest("/catalog-service", catalog_service)
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
