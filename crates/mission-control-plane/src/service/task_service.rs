//! Task operations shared by the HTTP API and the MCP tools.
//!
//! Both entry points go through [`TaskService::create_task`], so the
//! orchestrator rules are applied identically no matter how a task arrives.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use mission_core::{
    default_creation_status, filter_assignees, normalize_requested_status, Activity, ActivityKind,
    Agent, AgentId, AgentStatus, CoreError, Task, TaskId, TaskPriority, TaskStatus,
};

use crate::state::AppState;

/// Input for task creation, before any normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Requested status, unvalidated. Anything but a known status string
    /// falls back to the creation default.
    #[serde(default)]
    pub status: Value,

    #[serde(default)]
    pub priority: Option<String>,

    #[serde(default)]
    pub assignee_ids: Vec<String>,

    /// Agent creating the task. `None` for humans on the dashboard.
    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// TaskService implementation.
#[derive(Clone)]
pub struct TaskService {
    state: Arc<AppState>,
}

impl TaskService {
    /// Create a new TaskService.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Create a task, applying the orchestrator rules.
    pub async fn create_task(&self, input: NewTask) -> Result<Task, CoreError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(CoreError::InvalidInput("title is required".to_string()));
        }

        let priority = match input.priority.as_deref() {
            Some(raw) => raw.parse::<TaskPriority>()?,
            None => TaskPriority::default(),
        };

        let requester = match input.created_by.as_deref() {
            Some(raw) => Some(self.resolve_agent(raw).await?),
            None => None,
        };
        let is_orchestrator = requester.as_ref().is_some_and(Agent::is_orchestrator);

        let requested: Vec<AgentId> = input.assignee_ids.into_iter().map(AgentId::from).collect();
        let assignees = match &requester {
            Some(agent) => filter_assignees(&requested, &agent.id, is_orchestrator),
            None => requested,
        };
        for assignee in &assignees {
            self.resolve_agent(assignee.as_str()).await?;
        }

        let status = normalize_requested_status(&input.status, is_orchestrator)
            .unwrap_or_else(|| default_creation_status(&assignees));

        let mut task = Task::new(title)
            .with_description(input.description)
            .with_priority(priority)
            .with_assignees(assignees)
            .with_status(status);
        for tag in input.tags {
            task = task.with_tag(tag);
        }
        let creator = requester.map(|agent| agent.id);
        if let Some(creator) = &creator {
            task = task.with_creator(creator.clone());
        }

        let task_id = task.id.clone();
        self.state.tasks.write().await.insert(task_id.clone(), task.clone());

        info!(
            task_id = %task_id,
            status = %task.status,
            assignees = task.assignee_ids.len(),
            orchestrator = is_orchestrator,
            "Created task"
        );

        self.state
            .record_activity(Activity::task_created(task_id.clone(), &task.title, creator))
            .await;

        if !task.assignee_ids.is_empty() {
            let mut agents = self.state.agents.write().await;
            for assignee in &task.assignee_ids {
                if let Some(agent) = agents.get_mut(assignee) {
                    agent.status = AgentStatus::Active;
                }
            }
        }
        for assignee in &task.assignee_ids {
            let activity = Activity::new(
                ActivityKind::TaskAssigned,
                format!("Assigned {} to \"{}\"", assignee, task.title),
            )
            .for_task(task_id.clone())
            .by_agent(Some(assignee.clone()));
            self.state.record_activity(activity).await;
        }

        Ok(task)
    }

    /// Get a task by id.
    pub async fn get_task(&self, task_id: &TaskId) -> Result<Task, CoreError> {
        self.state
            .tasks
            .read()
            .await
            .get(task_id)
            .cloned()
            .ok_or_else(|| CoreError::TaskNotFound(task_id.to_string()))
    }

    /// List tasks, newest first, optionally filtered by status name.
    pub async fn list_tasks(&self, status: Option<&str>) -> Result<Vec<Task>, CoreError> {
        let status = status.map(str::parse::<TaskStatus>).transpose()?;

        let tasks = self.state.tasks.read().await;
        let mut listed: Vec<Task> = tasks
            .values()
            .filter(|task| status.map_or(true, |s| task.status == s))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(count = listed.len(), "Listed tasks");
        Ok(listed)
    }

    /// Move a task to a new status.
    pub async fn update_status(
        &self,
        task_id: &TaskId,
        status: &str,
        changed_by: Option<AgentId>,
    ) -> Result<Task, CoreError> {
        let next: TaskStatus = status.parse()?;
        if let Some(agent) = &changed_by {
            self.resolve_agent(agent.as_str()).await?;
        }

        let (previous, task) = {
            let mut tasks = self.state.tasks.write().await;
            let task = tasks
                .get_mut(task_id)
                .ok_or_else(|| CoreError::TaskNotFound(task_id.to_string()))?;
            let previous = task.set_status(next)?;
            (previous, task.clone())
        };

        info!(
            task_id = %task_id,
            from = %previous,
            to = %next,
            "Task status changed"
        );

        self.state
            .record_activity(Activity::status_changed(
                task_id.clone(),
                previous,
                next,
                changed_by,
            ))
            .await;

        Ok(task)
    }

    async fn resolve_agent(&self, raw: &str) -> Result<Agent, CoreError> {
        self.state
            .agents
            .read()
            .await
            .get(&AgentId::new(raw))
            .cloned()
            .ok_or_else(|| CoreError::InvalidAgent(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use mission_core::AgentRole;
    use serde_json::json;

    async fn seeded_state() -> Arc<AppState> {
        let state = AppState::new(Config::default());
        {
            let mut agents = state.agents.write().await;
            for (id, role) in [
                ("jarvis", AgentRole::Orchestrator),
                ("friday", AgentRole::Specialist),
                ("vision", AgentRole::Specialist),
            ] {
                agents.insert(AgentId::new(id), Agent::new(AgentId::new(id), id).with_role(role));
            }
        }
        state
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..NewTask::default()
        }
    }

    #[tokio::test]
    async fn test_human_task_without_assignees_lands_in_inbox() {
        let service = TaskService::new(seeded_state().await);
        let task = service.create_task(new_task("Plan launch")).await.unwrap();
        assert_eq!(task.status, TaskStatus::Inbox);
        assert_eq!(task.created_by, None);
    }

    #[tokio::test]
    async fn test_assignees_default_to_assigned() {
        let state = seeded_state().await;
        let service = TaskService::new(state.clone());
        let task = service
            .create_task(NewTask {
                assignee_ids: vec!["friday".to_string()],
                ..new_task("Research")
            })
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Assigned);

        let friday = state.agents.read().await[&AgentId::new("friday")].clone();
        assert_eq!(friday.status, AgentStatus::Active);

        let feed = state.recent_activities(2).await;
        assert_eq!(feed[0].kind, ActivityKind::TaskAssigned);
        assert_eq!(feed[0].agent_id, Some(AgentId::new("friday")));
        assert_eq!(feed[1].kind, ActivityKind::TaskCreated);
    }

    #[tokio::test]
    async fn test_orchestrator_is_stripped_and_stays_in_inbox() {
        let service = TaskService::new(seeded_state().await);
        let task = service
            .create_task(NewTask {
                assignee_ids: vec!["jarvis".to_string()],
                created_by: Some("jarvis".to_string()),
                ..new_task("Delegate me")
            })
            .await
            .unwrap();
        assert!(task.assignee_ids.is_empty());
        assert_eq!(task.status, TaskStatus::Inbox);
        assert_eq!(task.created_by, Some(AgentId::new("jarvis")));
    }

    #[tokio::test]
    async fn test_orchestrator_requested_in_progress_becomes_inbox() {
        let service = TaskService::new(seeded_state().await);
        let task = service
            .create_task(NewTask {
                status: json!("in_progress"),
                assignee_ids: vec!["jarvis".to_string(), "friday".to_string()],
                created_by: Some("jarvis".to_string()),
                ..new_task("Build it")
            })
            .await
            .unwrap();
        assert_eq!(task.assignee_ids, vec![AgentId::new("friday")]);
        assert_eq!(task.status, TaskStatus::Inbox);
    }

    #[tokio::test]
    async fn test_specialist_keeps_requested_status_and_self_assignment() {
        let service = TaskService::new(seeded_state().await);
        let task = service
            .create_task(NewTask {
                status: json!("in_progress"),
                assignee_ids: vec!["friday".to_string()],
                created_by: Some("friday".to_string()),
                ..new_task("Self-serve")
            })
            .await
            .unwrap();
        assert_eq!(task.assignee_ids, vec![AgentId::new("friday")]);
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_unrecognized_status_falls_back_to_default() {
        let service = TaskService::new(seeded_state().await);
        let task = service
            .create_task(NewTask {
                status: json!(42),
                assignee_ids: vec!["vision".to_string()],
                ..new_task("Odd status")
            })
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Assigned);
    }

    #[tokio::test]
    async fn test_unknown_agents_are_rejected() {
        let service = TaskService::new(seeded_state().await);
        let err = service
            .create_task(NewTask {
                assignee_ids: vec!["ghost".to_string()],
                ..new_task("Haunted")
            })
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidAgent("ghost".to_string()));

        let err = service
            .create_task(NewTask {
                created_by: Some("ghost".to_string()),
                ..new_task("Haunted")
            })
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidAgent("ghost".to_string()));
    }

    #[tokio::test]
    async fn test_bad_priority_and_title() {
        let service = TaskService::new(seeded_state().await);
        let err = service
            .create_task(NewTask {
                priority: Some("critical".to_string()),
                ..new_task("x")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPriority(_)));

        let err = service.create_task(new_task("   ")).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_status_records_activity() {
        let state = seeded_state().await;
        let service = TaskService::new(state.clone());
        let task = service.create_task(new_task("Move me")).await.unwrap();

        let updated = service
            .update_status(&task.id, "review", Some(AgentId::new("friday")))
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Review);

        let feed = state.recent_activities(1).await;
        assert_eq!(feed[0].message, "Moved task from inbox to review");
    }

    #[tokio::test]
    async fn test_update_status_errors() {
        let service = TaskService::new(seeded_state().await);
        let task = service.create_task(new_task("Move me")).await.unwrap();

        assert!(matches!(
            service.update_status(&task.id, "later", None).await,
            Err(CoreError::InvalidStatus(_))
        ));
        assert!(matches!(
            service.update_status(&task.id, "inbox", None).await,
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            service.update_status(&TaskId::new("nope"), "done", None).await,
            Err(CoreError::TaskNotFound(_))
        ));
        assert!(matches!(
            service
                .update_status(&task.id, "review", Some(AgentId::new("ghost")))
                .await,
            Err(CoreError::InvalidAgent(_))
        ));
        assert_eq!(service.get_task(&task.id).await.unwrap().status, TaskStatus::Inbox);
    }

    #[tokio::test]
    async fn test_list_tasks_filters_by_status() {
        let service = TaskService::new(seeded_state().await);
        service.create_task(new_task("a")).await.unwrap();
        service
            .create_task(NewTask {
                assignee_ids: vec!["friday".to_string()],
                ..new_task("b")
            })
            .await
            .unwrap();

        assert_eq!(service.list_tasks(None).await.unwrap().len(), 2);
        let assigned = service.list_tasks(Some("assigned")).await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].title, "b");
        assert!(service.list_tasks(Some("bogus")).await.is_err());
    }
}
