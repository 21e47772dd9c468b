//! Read receipt and delivery handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use mission_core::{AgentId, TaskId, TypingState};

use crate::http::error::{ApiError, OrApiError};
use crate::service::{TypingEvent, TypingService};
use crate::state::AppState;

async fn record(
    state: Arc<AppState>,
    task_id: String,
    agent_id: String,
    event: TypingEvent,
) -> Result<Json<TypingState>, ApiError> {
    let typing = TypingService::new(state.clone())
        .record(&TaskId::new(task_id), &AgentId::new(agent_id), event)
        .await
        .or_api_error(&state)?;
    Ok(Json(typing))
}

/// POST /v1/tasks/:task_id/agents/:agent_id/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path((task_id, agent_id)): Path<(String, String)>,
) -> Result<Json<TypingState>, ApiError> {
    record(state, task_id, agent_id, TypingEvent::Read).await
}

/// POST /v1/tasks/:task_id/agents/:agent_id/delivery
pub async fn mark_delivery_started(
    State(state): State<Arc<AppState>>,
    Path((task_id, agent_id)): Path<(String, String)>,
) -> Result<Json<TypingState>, ApiError> {
    record(state, task_id, agent_id, TypingEvent::DeliveryStarted).await
}

/// POST /v1/tasks/:task_id/agents/:agent_id/delivery-ended
pub async fn mark_delivery_ended(
    State(state): State<Arc<AppState>>,
    Path((task_id, agent_id)): Path<(String, String)>,
) -> Result<Json<TypingState>, ApiError> {
    record(state, task_id, agent_id, TypingEvent::DeliveryEnded).await
}
