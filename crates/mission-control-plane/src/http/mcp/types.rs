//! MCP request and response types.

use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use mission_core::{ErrorClassification, Task};

// ============================================================================
// Generic MCP Types
// ============================================================================

/// Generic MCP request wrapper.
#[derive(Debug, Deserialize)]
pub struct McpRequest<T> {
    /// Tool-specific parameters.
    pub params: T,
}

/// Generic MCP response wrapper.
#[derive(Debug, Serialize)]
pub struct McpResponse<T> {
    /// Tool result on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,

    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl<T> McpResponse<T> {
    /// Create a success response.
    pub fn ok(result: T) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response from a classified failure.
    pub fn err(classified: ErrorClassification) -> Self {
        Self {
            result: None,
            error: Some(McpError {
                code: error_code(classified.status).to_string(),
                status: classified.status,
                message: classified.message,
            }),
        }
    }
}

impl<T> From<JsonRejection> for McpResponse<T> {
    fn from(rejection: JsonRejection) -> Self {
        Self::err(ErrorClassification {
            status: rejection.status().as_u16(),
            message: rejection.body_text(),
        })
    }
}

/// MCP error details.
#[derive(Debug, Serialize)]
pub struct McpError {
    /// Error code.
    pub code: String,

    /// HTTP status the same failure gets on the REST API.
    pub status: u16,

    /// Human-readable error message.
    pub message: String,
}

fn error_code(status: u16) -> &'static str {
    match status {
        400 => "BAD_REQUEST",
        401 => "UNAUTHORIZED",
        403 => "FORBIDDEN",
        404 => "NOT_FOUND",
        422 => "VALIDATION_FAILED",
        500..=599 => "INTERNAL",
        _ => "REJECTED",
    }
}

// ============================================================================
// list_tasks Types
// ============================================================================

/// Parameters for list_tasks.
#[derive(Debug, Deserialize, Default)]
pub struct ListTasksParams {
    /// Optional filter by status.
    pub status: Option<String>,
}

/// Result of list_tasks.
#[derive(Debug, Serialize)]
pub struct ListTasksResult {
    pub tasks: Vec<Task>,
}

// ============================================================================
// update_task_status Types
// ============================================================================

/// Parameters for update_task_status.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusParams {
    pub task_id: String,
    pub status: String,

    /// Agent making the change.
    #[serde(default)]
    pub agent_id: Option<String>,
}
