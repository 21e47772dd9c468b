//! Agent types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AgentId, AgentStatus};

/// Role an agent plays on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Hands out work to other agents. Never auto-assigned to tasks it creates.
    Orchestrator,
    /// Does the work.
    #[default]
    Specialist,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orchestrator => "orchestrator",
            Self::Specialist => "specialist",
        }
    }
}

/// A registered AI agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier.
    pub id: AgentId,

    /// Display name.
    pub name: String,

    /// Role on the board.
    pub role: AgentRole,

    /// Current status.
    pub status: AgentStatus,

    /// When the agent was registered.
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new specialist agent.
    pub fn new(id: AgentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: AgentRole::default(),
            status: AgentStatus::default(),
            created_at: Utc::now(),
        }
    }

    /// Builder method to set the role.
    pub fn with_role(mut self, role: AgentRole) -> Self {
        self.role = role;
        self
    }

    pub fn is_orchestrator(&self) -> bool {
        self.role == AgentRole::Orchestrator
    }
}
