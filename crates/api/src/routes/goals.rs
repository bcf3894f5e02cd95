//! Goal listing endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use common::Goal;
use data_store::DataStore;
use domain::ListQuery;

use crate::state::AppState;

/// GET /v1/goals — list goals, optionally filtered by `query` and sorted by `sort`.
///
/// A filter matching nothing is a 200 with an empty array.
#[tracing::instrument(skip(state))]
pub async fn list<S: DataStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Goal>> {
    Json(state.goals.catalog().search_goals(&query))
}
