//! Shared application state.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use mission_core::{
    classify_error, Activity, Agent, AgentId, CoreError, Document, ErrorClassification, Skill,
    Task, TaskId, TypingState,
};

use crate::config::Config;

/// Shared application state.
pub struct AppState {
    /// Runtime configuration.
    pub config: Config,

    /// Registered agents indexed by AgentId.
    pub agents: RwLock<HashMap<AgentId, Agent>>,

    /// Tasks indexed by TaskId.
    pub tasks: RwLock<HashMap<TaskId, Task>>,

    /// Skills indexed by slug.
    pub skills: RwLock<HashMap<String, Skill>>,

    /// Documents indexed by slug.
    pub documents: RwLock<HashMap<String, Document>>,

    /// Read/delivery timestamps per (task, agent) pair.
    pub typing: RwLock<HashMap<(TaskId, AgentId), TypingState>>,

    /// Activity feed, oldest first.
    pub activities: RwLock<VecDeque<Activity>>,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self::with_config(config))
    }

    fn with_config(config: Config) -> Self {
        Self {
            config,
            agents: RwLock::new(HashMap::new()),
            tasks: RwLock::new(HashMap::new()),
            skills: RwLock::new(HashMap::new()),
            documents: RwLock::new(HashMap::new()),
            typing: RwLock::new(HashMap::new()),
            activities: RwLock::new(VecDeque::new()),
        }
    }

    /// Classify an error with the configured rules.
    ///
    /// Only the error's summary is matched, so ids in the message cannot
    /// change the status. The full message is kept for the response.
    pub fn classify(&self, err: &CoreError) -> ErrorClassification {
        let classified = classify_error(err.summary(), &self.config.error_rules);
        ErrorClassification {
            status: classified.status,
            message: err.to_string(),
        }
    }

    /// Append to the activity feed, dropping the oldest entries past the limit.
    pub async fn record_activity(&self, activity: Activity) {
        debug!(kind = ?activity.kind, message = %activity.message, "Recording activity");
        let mut feed = self.activities.write().await;
        feed.push_back(activity);
        while feed.len() > self.config.activity_feed_limit {
            feed.pop_front();
        }
    }

    /// Most recent activities, newest first.
    pub async fn recent_activities(&self, limit: usize) -> Vec<Activity> {
        self.activities
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Get the number of registered agents.
    pub async fn agent_count(&self) -> usize {
        self.agents.read().await.len()
    }

    /// Get the number of tasks.
    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mission_core::ActivityKind;

    #[tokio::test]
    async fn test_activity_feed_is_capped() {
        let state = AppState::new(Config {
            activity_feed_limit: 2,
            ..Config::default()
        });

        for i in 0..3 {
            state
                .record_activity(Activity::new(ActivityKind::TaskCreated, format!("a{}", i)))
                .await;
        }

        let recent = state.recent_activities(10).await;
        let messages: Vec<&str> = recent.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, vec!["a2", "a1"]);
    }

    #[test]
    fn test_classify_ignores_ids_in_message() {
        let state = AppState::default();

        let classified = state.classify(&CoreError::TaskNotFound("forbidden".to_string()));
        assert_eq!(classified.status, 404);
        assert_eq!(classified.message, "Task not found: forbidden");

        let classified = state.classify(&CoreError::InvalidAgent("x not found".to_string()));
        assert_eq!(classified.status, 422);
    }

    #[tokio::test]
    async fn test_counts_start_at_zero() {
        let state = AppState::new(Config::default());
        assert_eq!(state.agent_count().await, 0);
        assert_eq!(state.task_count().await, 0);
    }
}
