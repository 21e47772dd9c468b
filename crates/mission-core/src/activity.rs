//! Activity feed entries.

use serde::{Deserialize, Serialize};

use crate::ids::{ActivityId, AgentId, TaskId};

/// A single entry in the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique entry identifier.
    pub id: ActivityId,
    /// What happened.
    pub kind: ActivityKind,
    /// Task involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    /// Agent involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentId>,
    /// Human-readable summary.
    pub message: String,
    /// Unix timestamp (milliseconds) when the activity occurred.
    pub timestamp_ms: i64,
}

impl Activity {
    /// Create a new activity entry stamped with the current time.
    pub fn new(kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            id: ActivityId::generate(),
            kind,
            task_id: None,
            agent_id: None,
            message: message.into(),
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Builder method to attach a task.
    pub fn for_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Builder method to attach an agent.
    pub fn by_agent(mut self, agent_id: Option<AgentId>) -> Self {
        self.agent_id = agent_id;
        self
    }

    /// Create a TaskCreated entry.
    pub fn task_created(task_id: TaskId, title: &str, agent_id: Option<AgentId>) -> Self {
        Self::new(ActivityKind::TaskCreated, format!("Created task \"{}\"", title))
            .for_task(task_id)
            .by_agent(agent_id)
    }

    /// Create a TaskStatusChanged entry.
    pub fn status_changed(
        task_id: TaskId,
        from: crate::TaskStatus,
        to: crate::TaskStatus,
        agent_id: Option<AgentId>,
    ) -> Self {
        Self::new(
            ActivityKind::TaskStatusChanged,
            format!("Moved task from {} to {}", from, to),
        )
        .for_task(task_id)
        .by_agent(agent_id)
    }
}

/// Type of activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    TaskCreated,
    TaskStatusChanged,
    TaskAssigned,
    DocumentSaved,
    SkillSaved,
    MessageRead,
    AgentRegistered,
}
