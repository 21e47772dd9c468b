//! Read receipts, delivery events and the typing indicator.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use mission_core::{Activity, ActivityKind, AgentId, CoreError, TaskId, TypingState};

use crate::state::AppState;

/// Lifecycle event recorded against an (agent, task) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingEvent {
    Read,
    DeliveryStarted,
    DeliveryEnded,
}

/// TypingService implementation.
#[derive(Clone)]
pub struct TypingService {
    state: Arc<AppState>,
}

impl TypingService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Record an event at the current time.
    pub async fn record(
        &self,
        task_id: &TaskId,
        agent_id: &AgentId,
        event: TypingEvent,
    ) -> Result<TypingState, CoreError> {
        self.record_at(task_id, agent_id, event, Utc::now().timestamp_millis())
            .await
    }

    /// Record an event at `at_ms` (unix milliseconds).
    pub async fn record_at(
        &self,
        task_id: &TaskId,
        agent_id: &AgentId,
        event: TypingEvent,
        at_ms: i64,
    ) -> Result<TypingState, CoreError> {
        if !self.state.tasks.read().await.contains_key(task_id) {
            return Err(CoreError::TaskNotFound(task_id.to_string()));
        }
        if !self.state.agents.read().await.contains_key(agent_id) {
            return Err(CoreError::AgentNotFound(agent_id.to_string()));
        }

        let updated = {
            let mut typing = self.state.typing.write().await;
            let entry = typing
                .entry((task_id.clone(), agent_id.clone()))
                .or_default();
            match event {
                TypingEvent::Read => entry.mark_read(at_ms),
                TypingEvent::DeliveryStarted => entry.mark_delivered(at_ms),
                TypingEvent::DeliveryEnded => entry.mark_delivery_ended(at_ms),
            }
            *entry
        };

        debug!(task_id = %task_id, agent_id = %agent_id, event = ?event, "Recorded typing event");

        if event == TypingEvent::Read {
            self.state
                .record_activity(
                    Activity::new(
                        ActivityKind::MessageRead,
                        format!("{} read the latest message", agent_id),
                    )
                    .for_task(task_id.clone())
                    .by_agent(Some(agent_id.clone())),
                )
                .await;
        }

        Ok(updated)
    }

    /// Agents currently typing on a task, sorted by id.
    ///
    /// Evaluated from the stored timestamps on every call.
    pub async fn typing_agents(&self, task_id: &TaskId) -> Result<Vec<AgentId>, CoreError> {
        if !self.state.tasks.read().await.contains_key(task_id) {
            return Err(CoreError::TaskNotFound(task_id.to_string()));
        }

        let typing = self.state.typing.read().await;
        let mut agents: Vec<AgentId> = typing
            .iter()
            .filter(|((task, _), state)| task == task_id && state.is_typing())
            .map(|((_, agent), _)| agent.clone())
            .collect();
        agents.sort();
        Ok(agents)
    }
}
