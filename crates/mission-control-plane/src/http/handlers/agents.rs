//! Agent handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use mission_core::{Agent, AgentId};

use crate::http::error::{ApiError, OrApiError};
use crate::http::responses::RegisterAgentRequest;
use crate::service::AgentService;
use crate::state::AppState;

/// POST /v1/agents
pub async fn register_agent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterAgentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Agent>), ApiError> {
    let Json(req) = payload?;
    let agent = AgentService::new(state.clone())
        .register(&req.id, &req.name, req.role)
        .await
        .or_api_error(&state)?;
    Ok((StatusCode::CREATED, Json(agent)))
}

/// GET /v1/agents
pub async fn list_agents(State(state): State<Arc<AppState>>) -> Json<Vec<Agent>> {
    Json(AgentService::new(state).list().await)
}

/// GET /v1/agents/:agent_id
pub async fn get_agent(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<String>,
) -> Result<Json<Agent>, ApiError> {
    let agent = AgentService::new(state.clone())
        .get(&AgentId::new(agent_id))
        .await
        .or_api_error(&state)?;
    Ok(Json(agent))
}
