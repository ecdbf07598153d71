//! Application setup and router configuration.

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{health_handler, moderation_trigger_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: ServerDeps,
}

/// Build the Axum application router
pub fn build_app(db_pool: PgPool, deps: ServerDeps) -> Router {
    let state = AppState { db_pool, deps };

    Router::new()
        .route("/health", get(health_handler))
        .route("/triggers/moderation", post(moderation_trigger_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
