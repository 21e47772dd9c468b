//! Status enums for Tasks and Agents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Status of a Task on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task created and waiting for triage.
    #[default]
    Inbox,
    /// Task has at least one assignee but no work started.
    Assigned,
    /// An assignee is working on the task.
    InProgress,
    /// Work is waiting for review.
    Review,
    /// Task finished.
    Done,
    /// Task cannot progress.
    Blocked,
    /// Task hidden from the board.
    Archived,
}

impl TaskStatus {
    /// Every status, in board order.
    pub const ALL: [TaskStatus; 7] = [
        Self::Inbox,
        Self::Assigned,
        Self::InProgress,
        Self::Review,
        Self::Done,
        Self::Blocked,
        Self::Archived,
    ];

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
            Self::Blocked => "blocked",
            Self::Archived => "archived",
        }
    }

    /// Returns true if a task in this status may move to `next`.
    ///
    /// Archived tasks can only be restored to the inbox, and a task never
    /// "moves" to the status it already has.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        if *self == next {
            return false;
        }
        match self {
            Self::Archived => next == Self::Inbox,
            _ => true,
        }
    }

    /// Check a transition, producing the domain error when it is not allowed.
    pub fn transition_to(&self, next: TaskStatus) -> Result<TaskStatus, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::InvalidStatus(s.to_string()))
    }
}

/// Priority of a Task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(CoreError::InvalidPriority(other.to_string())),
        }
    }
}

/// Status of an Agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Agent is registered and waiting for work.
    #[default]
    Idle,
    /// Agent has been assigned work.
    Active,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_wire_name() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "IN_PROGRESS".parse::<TaskStatus>().unwrap_err();
        assert_eq!(err, CoreError::InvalidStatus("IN_PROGRESS".to_string()));
    }

    #[test]
    fn test_archived_only_restores_to_inbox() {
        assert!(TaskStatus::Archived.can_transition_to(TaskStatus::Inbox));
        assert!(!TaskStatus::Archived.can_transition_to(TaskStatus::Done));
        assert!(TaskStatus::Done.can_transition_to(TaskStatus::Archived));
    }

    #[test]
    fn test_transition_to_same_status_fails() {
        let err = TaskStatus::Review.transition_to(TaskStatus::Review).unwrap_err();
        assert_eq!(err.to_string(), "Invalid transition: review -> review");
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("urgent".parse::<TaskPriority>().unwrap(), TaskPriority::Urgent);
        assert!(matches!(
            "critical".parse::<TaskPriority>(),
            Err(CoreError::InvalidPriority(_))
        ));
    }
}
