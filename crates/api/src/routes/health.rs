//! Liveness probes.

use std::sync::Arc;

use axum::extract::State;

use crate::state::AppState;

/// GET /health-check
pub async fn check() -> &'static str {
    "ok"
}

/// GET /user-service/health-check
pub async fn user_service(State(state): State<Arc<AppState>>) -> String {
    status("User Service", state.port)
}

/// GET /order-service/health-check
pub async fn order_service(State(state): State<Arc<AppState>>) -> String {
    status("Order Service", state.port)
}

/// GET /catalog-service/health-check
pub async fn catalog_service(State(state): State<Arc<AppState>>) -> String {
    status("Catalog Service", state.port)
}

fn status(service: &str, port: u16) -> String {
    format!("It's working in {service} on port {port}")
}
