//! HTTP request and response types.

use serde::{Deserialize, Serialize};

use mission_core::AgentRole;

// ============================================================================
// Error types
// ============================================================================

/// Error response: `status` mirrors the HTTP response code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

// ============================================================================
// Task types
// ============================================================================

/// Query string for task listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Only return tasks in this status.
    pub status: Option<String>,
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,

    /// Agent making the change, if any.
    #[serde(default)]
    pub changed_by: Option<String>,
}

/// Agents currently typing on a task.
#[derive(Debug, Serialize)]
pub struct TypingResponse {
    pub task_id: String,
    pub agent_ids: Vec<String>,
}

// ============================================================================
// Agent types
// ============================================================================

/// Request body for agent registration.
#[derive(Debug, Deserialize)]
pub struct RegisterAgentRequest {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub role: AgentRole,
}

// ============================================================================
// Content types
// ============================================================================

/// Request body for writing a skill.
#[derive(Debug, Deserialize)]
pub struct PutSkillRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub content_markdown: String,
}

/// Request body for writing a document.
#[derive(Debug, Deserialize)]
pub struct PutDocumentRequest {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content_markdown: String,

    #[serde(default)]
    pub task_id: Option<String>,
}

// ============================================================================
// Activity types
// ============================================================================

/// Query string for the activity feed.
#[derive(Debug, Default, Deserialize)]
pub struct ActivitiesQuery {
    /// Maximum number of entries, newest first.
    pub limit: Option<usize>,
}
