//! Agent registry.

use std::sync::Arc;

use tracing::info;

use mission_core::{Activity, ActivityKind, Agent, AgentId, AgentRole, CoreError};

use crate::state::AppState;

/// AgentService implementation.
#[derive(Clone)]
pub struct AgentService {
    state: Arc<AppState>,
}

impl AgentService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Register an agent, replacing any agent with the same id.
    pub async fn register(
        &self,
        id: &str,
        name: &str,
        role: AgentRole,
    ) -> Result<Agent, CoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CoreError::InvalidInput("agent id is required".to_string()));
        }
        let name = if name.trim().is_empty() { id } else { name.trim() };

        let agent = Agent::new(AgentId::new(id), name).with_role(role);
        let replaced = self
            .state
            .agents
            .write()
            .await
            .insert(agent.id.clone(), agent.clone())
            .is_some();

        info!(agent_id = %agent.id, role = ?role, replaced, "Registered agent");

        self.state
            .record_activity(
                Activity::new(
                    ActivityKind::AgentRegistered,
                    format!("Registered agent {}", agent.name),
                )
                .by_agent(Some(agent.id.clone())),
            )
            .await;

        Ok(agent)
    }

    /// Get an agent by id.
    pub async fn get(&self, id: &AgentId) -> Result<Agent, CoreError> {
        self.state
            .agents
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::AgentNotFound(id.to_string()))
    }

    /// List agents sorted by id.
    pub async fn list(&self) -> Vec<Agent> {
        let mut agents: Vec<Agent> = self.state.agents.read().await.values().cloned().collect();
        agents.sort_by(|a, b| a.id.cmp(&b.id));
        agents
    }
}
