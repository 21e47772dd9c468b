//! Task types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AgentId, CoreError, TaskId, TaskPriority, TaskStatus};

/// A Task is a card on the mission board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,

    /// Short title shown on the board.
    pub title: String,

    /// Longer description (markdown).
    #[serde(default)]
    pub description: String,

    /// Current task status.
    pub status: TaskStatus,

    /// Task priority.
    pub priority: TaskPriority,

    /// Agents responsible for the task.
    pub assignee_ids: Vec<AgentId>,

    /// Agent that created the task, if it was created by an agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<AgentId>,

    /// When the task was created.
    pub created_at: DateTime<Utc>,

    /// When the task was last changed.
    pub updated_at: DateTime<Utc>,

    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// Create a new Task in the inbox.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::generate(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Inbox,
            priority: TaskPriority::default(),
            assignee_ids: Vec::new(),
            created_by: None,
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the priority.
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder method to set assignees.
    pub fn with_assignees(mut self, assignees: Vec<AgentId>) -> Self {
        self.assignee_ids = assignees;
        self
    }

    /// Builder method to set the creator.
    pub fn with_creator(mut self, creator: AgentId) -> Self {
        self.created_by = Some(creator);
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder method to add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Move the task to `next`, enforcing the transition rules.
    pub fn set_status(&mut self, next: TaskStatus) -> Result<TaskStatus, CoreError> {
        let previous = self.status;
        self.status = previous.transition_to(next)?;
        self.updated_at = Utc::now();
        Ok(previous)
    }
}

/// Status a new task gets when the request did not pin one.
///
/// Tasks created with assignees go straight to `assigned`.
pub fn default_creation_status(assignees: &[AgentId]) -> TaskStatus {
    if assignees.is_empty() {
        TaskStatus::Inbox
    } else {
        TaskStatus::Assigned
    }
}
