//! Activity feed handler.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use mission_core::Activity;

use crate::http::error::ApiError;
use crate::http::responses::ActivitiesQuery;
use crate::state::AppState;

const DEFAULT_FEED_PAGE: usize = 50;

/// GET /v1/activities?limit=50
pub async fn list_activities(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ActivitiesQuery>, QueryRejection>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_FEED_PAGE);
    Ok(Json(state.recent_activities(limit).await))
}
