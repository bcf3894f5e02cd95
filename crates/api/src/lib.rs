//! HTTP API server for the goal tracker.
//!
//! Serves goal and category listings and the current user's goal actions,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use data_store::DataStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: DataStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route("/v1/goals", get(routes::goals::list::<S>))
        .route("/v1/me", get(routes::me::get::<S>))
        .route("/v1/me/goals/{goal_id}/accept", post(routes::me::accept::<S>))
        .route("/v1/me/goals/{goal_id}/achieve", post(routes::me::achieve::<S>))
        .route(
            "/v1/me/goals/{goal_id}/challenge/{user_id}",
            post(routes::me::challenge::<S>),
        )
        .route(
            "/v1/me/goals/{goal_id}/gift/{user_id}",
            post(routes::me::gift::<S>),
        )
        .route("/v1/categories", get(routes::categories::list::<S>))
        .route(
            "/v1/categories/{category_id}/goals",
            get(routes::categories::goals::<S>),
        )
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
