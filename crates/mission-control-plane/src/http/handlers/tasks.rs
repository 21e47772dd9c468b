//! Task handlers.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use mission_core::{AgentId, Task, TaskId};

use crate::http::error::{ApiError, OrApiError};
use crate::http::responses::{ListTasksQuery, TypingResponse, UpdateStatusRequest};
use crate::service::{NewTask, TaskService, TypingService};
use crate::state::AppState;

/// Create a task.
///
/// POST /v1/tasks
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(req) = payload?;
    let task = TaskService::new(state.clone())
        .create_task(req)
        .await
        .or_api_error(&state)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// List tasks, newest first.
///
/// GET /v1/tasks?status=inbox
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let Query(query) = query?;
    let tasks = TaskService::new(state.clone())
        .list_tasks(query.status.as_deref())
        .await
        .or_api_error(&state)?;
    Ok(Json(tasks))
}

/// Get a single task.
///
/// GET /v1/tasks/:task_id
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = TaskService::new(state.clone())
        .get_task(&TaskId::new(task_id))
        .await
        .or_api_error(&state)?;
    Ok(Json(task))
}

/// Change a task's status.
///
/// PATCH /v1/tasks/:task_id/status
pub async fn update_task_status(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(req) = payload?;
    let task = TaskService::new(state.clone())
        .update_status(
            &TaskId::new(task_id),
            &req.status,
            req.changed_by.map(AgentId::from),
        )
        .await
        .or_api_error(&state)?;
    Ok(Json(task))
}

/// Agents currently typing on a task.
///
/// GET /v1/tasks/:task_id/typing
pub async fn get_typing(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Json<TypingResponse>, ApiError> {
    let task_id = TaskId::new(task_id);
    let agents = TypingService::new(state.clone())
        .typing_agents(&task_id)
        .await
        .or_api_error(&state)?;

    Ok(Json(TypingResponse {
        task_id: task_id.into_inner(),
        agent_ids: agents.into_iter().map(AgentId::into_inner).collect(),
    }))
}
