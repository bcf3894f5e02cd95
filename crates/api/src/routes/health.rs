//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use data_store::DataStore;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub goals: usize,
    pub categories: usize,
    pub users: usize,
}

/// GET /health — returns service status and the size of each collection.
pub async fn check<S: DataStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<HealthResponse> {
    let catalog = state.goals.catalog();
    Json(HealthResponse {
        status: "ok",
        goals: catalog.goals().len(),
        categories: catalog.categories().len(),
        users: state.goals.user_count().await,
    })
}
