//! MCP tool handler implementations.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

use mission_core::{AgentId, Task, TaskId};

use crate::service::{NewTask, TaskService};
use crate::state::AppState;

use super::types::*;

fn rejected<T>(rejection: JsonRejection) -> Json<McpResponse<T>> {
    warn!(error = %rejection, "Invalid JSON in tool call");
    Json(McpResponse::from(rejection))
}

// ============================================================================
// create_task
// ============================================================================

/// Create a task. Same rules as `POST /v1/tasks`.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<McpRequest<NewTask>>, JsonRejection>,
) -> Json<McpResponse<Task>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(rejection),
    };
    match TaskService::new(state.clone())
        .create_task(request.params)
        .await
    {
        Ok(task) => {
            info!(task_id = %task.id, "Created task via MCP tool");
            Json(McpResponse::ok(task))
        }
        Err(e) => Json(McpResponse::err(state.classify(&e))),
    }
}

// ============================================================================
// list_tasks
// ============================================================================

/// List tasks, optionally filtered by status.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<McpRequest<ListTasksParams>>, JsonRejection>,
) -> Json<McpResponse<ListTasksResult>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(rejection),
    };
    match TaskService::new(state.clone())
        .list_tasks(request.params.status.as_deref())
        .await
    {
        Ok(tasks) => Json(McpResponse::ok(ListTasksResult { tasks })),
        Err(e) => Json(McpResponse::err(state.classify(&e))),
    }
}

// ============================================================================
// update_task_status
// ============================================================================

/// Move a task to a new status.
pub async fn update_task_status(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<McpRequest<UpdateTaskStatusParams>>, JsonRejection>,
) -> Json<McpResponse<Task>> {
    let params = match payload {
        Ok(Json(request)) => request.params,
        Err(rejection) => return rejected(rejection),
    };
    match TaskService::new(state.clone())
        .update_status(
            &TaskId::new(params.task_id),
            &params.status,
            params.agent_id.map(AgentId::from),
        )
        .await
    {
        Ok(task) => Json(McpResponse::ok(task)),
        Err(e) => Json(McpResponse::err(state.classify(&e))),
    }
}
