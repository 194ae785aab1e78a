use axum::{middleware, routing::get, Router};
use sqlx::PgPool;

use crate::observability::trace_http_requests;

use super::handlers::{config_handler, health_handler, list_assignments_handler};

/// Shared state for the example service handlers.
///
/// Built once at startup from resolved configuration; carries no secrets.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub service_name: String,
    pub vault_addr: String,
    pub vault_status: &'static str,
    pub jwt_algorithm: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/assignments", get(list_assignments_handler))
        .route("/api/config", get(config_handler))
        .layer(middleware::from_fn(trace_http_requests))
        .with_state(state)
}
