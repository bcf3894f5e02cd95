//! Category listing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use common::{Category, Goal};
use data_store::DataStore;
use domain::ListQuery;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /v1/categories — list categories, optionally filtered by name and sorted.
#[tracing::instrument(skip(state))]
pub async fn list<S: DataStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Category>> {
    Json(state.goals.catalog().search_categories(&query))
}

/// GET /v1/categories/:category_id/goals — list the goals in a category.
#[tracing::instrument(skip(state))]
pub async fn goals<S: DataStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let goals = state.goals.catalog().goals_in_category(&category_id)?;
    tracing::debug!(count = goals.len(), "goals in category");
    Ok(Json(goals))
}
