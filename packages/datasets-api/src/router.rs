//! HTTP router setup.

use crate::handlers;
use crate::middleware::request_context;
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Create the application router.
///
/// The listing is served on both `/datasets` and `/datasets/`. Requests
/// still running at the deadline get `504`.
pub fn create(state: Arc<AppState>) -> Router {
    let timeout = state.config.request_timeout();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/datasets", get(handlers::list_datasets))
        .route("/datasets/", get(handlers::list_datasets))
        .route("/datasets/update", post(handlers::update_dataset))
        .route("/datasets/create", post(handlers::create_dataset))
        .route("/datasets/sync", post(handlers::sync_datasets))
        .route("/datasets/delete/{id}", post(handlers::delete_dataset))
        .layer(axum::middleware::from_fn(request_context))
        .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
