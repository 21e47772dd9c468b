//! MCP (Model Context Protocol) server implementation.
//!
//! Provides MCP tools for agents working the board:
//! - `create_task` - Create a task (orchestrator rules applied)
//! - `list_tasks` - List tasks, optionally by status
//! - `update_task_status` - Move a task to a new status
//! - `typing_agents` - Agents with an open typing window on a task

use std::sync::Arc;

use axum::Router;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use mission_core::{AgentId, CoreError, TaskId};

use crate::service::{NewTask, TaskService, TypingService};
use crate::state::AppState;

/// MCP server for Mission Control operations.
#[derive(Clone)]
pub struct MissionMcpServer {
    state: Arc<AppState>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

// ============================================================================
// Tool Parameter Types
// ============================================================================

/// Parameters for create_task tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    /// Short task title.
    pub title: String,

    /// Longer description (markdown).
    #[serde(default)]
    pub description: String,

    /// Requested status (inbox, assigned, in_progress, review, done, blocked, archived).
    #[serde(default)]
    pub status: Option<serde_json::Value>,

    /// Priority (low, medium, high, urgent).
    #[serde(default)]
    pub priority: Option<String>,

    /// Agents to assign.
    #[serde(default)]
    pub assignee_ids: Vec<String>,

    /// Id of the calling agent.
    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<CreateTaskParams> for NewTask {
    fn from(params: CreateTaskParams) -> Self {
        Self {
            title: params.title,
            description: params.description,
            status: params.status.unwrap_or_default(),
            priority: params.priority,
            assignee_ids: params.assignee_ids,
            created_by: params.created_by,
            tags: params.tags,
        }
    }
}

/// Parameters for list_tasks tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListTasksParams {
    /// Optional filter by status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Parameters for update_task_status tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTaskStatusParams {
    /// Task to move.
    pub task_id: String,

    /// New status.
    pub status: String,

    /// Id of the calling agent.
    #[serde(default)]
    pub agent_id: Option<String>,
}

/// Parameters for typing_agents tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TypingAgentsParams {
    /// Task to inspect.
    pub task_id: String,
}

// ============================================================================
// Response Types
// ============================================================================

/// Compact task line returned by list_tasks.
#[derive(Debug, Serialize)]
pub struct TaskSummary {
    pub task_id: String,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub assignee_ids: Vec<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MissionMcpServer {
    /// Create a new MCP server with the given AppState.
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Turn a failure into a tool error carrying the classified status.
    fn tool_error(&self, err: CoreError) -> CallToolResult {
        let classified = self.state.classify(&err);
        CallToolResult::error(vec![Content::text(format!(
            "{} (status {})",
            classified.message, classified.status
        ))])
    }

    /// Create a task on the board.
    #[tool(description = "Create a task. Orchestrators are never assigned to tasks they create and cannot start them as assigned or in_progress.")]
    async fn create_task(
        &self,
        Parameters(params): Parameters<CreateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let service = TaskService::new(self.state.clone());
        match service.create_task(params.into()).await {
            Ok(task) => {
                info!(task_id = %task.id, "Created task via MCP");
                let response =
                    serde_json::to_string_pretty(&task).unwrap_or_else(|_| "{}".to_string());
                Ok(CallToolResult::success(vec![Content::text(response)]))
            }
            Err(e) => Ok(self.tool_error(e)),
        }
    }

    /// List tasks on the board.
    #[tool(description = "List tasks, newest first. Optionally filter by status.")]
    async fn list_tasks(
        &self,
        Parameters(params): Parameters<ListTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let service = TaskService::new(self.state.clone());
        let tasks = match service.list_tasks(params.status.as_deref()).await {
            Ok(tasks) => tasks,
            Err(e) => return Ok(self.tool_error(e)),
        };

        let summaries: Vec<TaskSummary> = tasks
            .into_iter()
            .map(|t| TaskSummary {
                task_id: t.id.into_inner(),
                title: t.title,
                status: t.status.to_string(),
                priority: t.priority.to_string(),
                assignee_ids: t.assignee_ids.into_iter().map(AgentId::into_inner).collect(),
            })
            .collect();

        info!(task_count = summaries.len(), "Listed tasks via MCP");

        let response =
            serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string());
        Ok(CallToolResult::success(vec![Content::text(response)]))
    }

    /// Move a task to a new status.
    #[tool(description = "Move a task to a new status. Archived tasks can only go back to inbox.")]
    async fn update_task_status(
        &self,
        Parameters(params): Parameters<UpdateTaskStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let service = TaskService::new(self.state.clone());
        match service
            .update_status(
                &TaskId::new(params.task_id),
                &params.status,
                params.agent_id.map(AgentId::from),
            )
            .await
        {
            Ok(task) => {
                let response =
                    serde_json::to_string_pretty(&task).unwrap_or_else(|_| "{}".to_string());
                Ok(CallToolResult::success(vec![Content::text(response)]))
            }
            Err(e) => Ok(self.tool_error(e)),
        }
    }

    /// Agents that read the latest message on a task and have not replied.
    #[tool(description = "List agents that read the latest message on a task and have not started replying.")]
    async fn typing_agents(
        &self,
        Parameters(params): Parameters<TypingAgentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let service = TypingService::new(self.state.clone());
        match service.typing_agents(&TaskId::new(params.task_id)).await {
            Ok(agents) => {
                let ids: Vec<String> = agents.into_iter().map(AgentId::into_inner).collect();
                let response =
                    serde_json::to_string_pretty(&ids).unwrap_or_else(|_| "[]".to_string());
                Ok(CallToolResult::success(vec![Content::text(response)]))
            }
            Err(e) => Ok(self.tool_error(e)),
        }
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl ServerHandler for MissionMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "mission-control-plane".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Mission Control MCP Server - manage the task board. \
                 Use list_tasks to see work, create_task to hand out work, \
                 and update_task_status to move cards."
                    .to_string(),
            ),
        }
    }
}

// ============================================================================
// HTTP Server Setup
// ============================================================================

/// Create an axum Router for the MCP HTTP server.
///
/// Handles MCP protocol requests over the Streamable HTTP transport, mounted
/// at `/mcp`.
pub fn create_mcp_router(state: Arc<AppState>, ct: CancellationToken) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(MissionMcpServer::new(state.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            cancellation_token: ct,
            ..Default::default()
        },
    );

    info!("MCP server initialized with Streamable HTTP transport");

    Router::new().nest_service("/mcp", service)
}
