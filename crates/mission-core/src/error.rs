//! Core domain errors.
//!
//! Messages are matched by [`crate::classify::classify_error`] at the HTTP
//! boundary, so the leading words ("not found", "Invalid status", ...) are
//! part of the contract.

use thiserror::Error;

/// Core domain errors for Mission Control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Task not found.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Agent not found.
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Skill or document not found.
    #[error("Content not found: {0}")]
    ContentNotFound(String),

    /// Status string outside the closed status set.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Priority string outside the known priorities.
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    /// Agent id that does not resolve to a registered agent.
    #[error("Invalid agent: {0}")]
    InvalidAgent(String),

    /// Disallowed status transition.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Markdown payload over the byte ceiling.
    #[error(
        "Content{} exceeds the maximum size of {limit} bytes (got {actual} bytes)",
        key_suffix(.key)
    )]
    ContentTooLarge {
        key: Option<String>,
        limit: usize,
        actual: usize,
    },

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// The message without any caller-supplied ids, slugs or values.
    ///
    /// Classify this rather than the full message: an id such as
    /// `forbidden` must not pick the response status.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::TaskNotFound(_) => "Task not found",
            Self::AgentNotFound(_) => "Agent not found",
            Self::ContentNotFound(_) => "Content not found",
            Self::InvalidStatus(_) => "Invalid status",
            Self::InvalidPriority(_) => "Invalid priority",
            Self::InvalidAgent(_) => "Invalid agent",
            Self::InvalidTransition { .. } => "Invalid transition",
            Self::ContentTooLarge { .. } => "Content exceeds the maximum size",
            Self::InvalidInput(_) => "Invalid input",
        }
    }
}

fn key_suffix(key: &Option<String>) -> String {
    key.as_ref()
        .map(|k| format!(" for '{}'", k))
        .unwrap_or_default()
}
