//! Current-user endpoints and goal actions.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::User;
use data_store::DataStore;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /v1/me — return the current user.
#[tracing::instrument(skip(state))]
pub async fn get<S: DataStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.goals.current_user().await?))
}

/// POST /v1/me/goals/:goal_id/accept — add a goal to the current user's accepted goals.
#[tracing::instrument(skip(state))]
pub async fn accept<S: DataStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(goal_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.goals.accept(&goal_id).await?;
    Ok(StatusCode::OK)
}

/// POST /v1/me/goals/:goal_id/achieve — add a goal to the current user's achieved goals.
#[tracing::instrument(skip(state))]
pub async fn achieve<S: DataStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(goal_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.goals.achieve(&goal_id).await?;
    Ok(StatusCode::OK)
}

/// POST /v1/me/goals/:goal_id/challenge/:user_id — challenge another user with a goal.
#[tracing::instrument(skip(state))]
pub async fn challenge<S: DataStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((goal_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.goals.challenge(&goal_id, &user_id).await?;
    Ok(StatusCode::OK)
}

/// POST /v1/me/goals/:goal_id/gift/:user_id — gift a goal to another user.
#[tracing::instrument(skip(state))]
pub async fn gift<S: DataStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((goal_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.goals.gift(&goal_id, &user_id).await?;
    Ok(StatusCode::OK)
}
