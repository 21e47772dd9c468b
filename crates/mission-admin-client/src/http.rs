//! HTTP client for REST endpoints.

use mission_core::{Activity, Agent, AgentRole, Skill, Task, TypingState};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;

/// Request body for task creation.
///
/// `status` is sent as-is; the control plane decides whether to honor it.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CreateTaskRequest {
    pub title: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignee_ids: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Agents currently typing on a task.
#[derive(Debug, Clone, Deserialize)]
pub struct TypingAgents {
    pub task_id: String,
    pub agent_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

/// HTTP client for REST API endpoints.
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if the control plane is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = self.url("/health");
        debug!(url = %url, "Checking health");

        let response = self.inner.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Create a task.
    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ClientError> {
        let url = self.url("/v1/tasks");
        debug!(url = %url, title = %request.title, "Creating task");

        let response = self.inner.post(&url).json(request).send().await?;
        decode(response).await
    }

    /// List tasks, newest first, optionally filtered by status.
    pub async fn list_tasks(&self, status: Option<&str>) -> Result<Vec<Task>, ClientError> {
        let url = self.url("/v1/tasks");
        debug!(url = %url, status = ?status, "Listing tasks");

        let mut request = self.inner.get(&url);
        if let Some(status) = status {
            request = request.query(&[("status", status)]);
        }
        decode(request.send().await?).await
    }

    /// Fetch a single task.
    pub async fn get_task(&self, task_id: &str) -> Result<Task, ClientError> {
        self.get_json(&format!("/v1/tasks/{}", task_id)).await
    }

    /// Move a task to a new status.
    pub async fn update_task_status(
        &self,
        task_id: &str,
        status: &str,
        changed_by: Option<&str>,
    ) -> Result<Task, ClientError> {
        let url = self.url(&format!("/v1/tasks/{}/status", task_id));
        debug!(url = %url, status, "Updating task status");

        let body = serde_json::json!({ "status": status, "changed_by": changed_by });
        let response = self.inner.patch(&url).json(&body).send().await?;
        decode(response).await
    }

    /// List registered agents.
    pub async fn list_agents(&self) -> Result<Vec<Agent>, ClientError> {
        self.get_json("/v1/agents").await
    }

    /// Register (or update) an agent.
    pub async fn register_agent(
        &self,
        id: &str,
        name: &str,
        role: AgentRole,
    ) -> Result<Agent, ClientError> {
        let url = self.url("/v1/agents");
        debug!(url = %url, agent_id = id, "Registering agent");

        let body = serde_json::json!({ "id": id, "name": name, "role": role });
        let response = self.inner.post(&url).json(&body).send().await?;
        decode(response).await
    }

    /// Write a skill's markdown body.
    pub async fn put_skill(
        &self,
        slug: &str,
        name: &str,
        content_markdown: &str,
    ) -> Result<Skill, ClientError> {
        let url = self.url(&format!("/v1/skills/{}", slug));
        debug!(url = %url, bytes = content_markdown.len(), "Writing skill");

        let body = serde_json::json!({ "name": name, "content_markdown": content_markdown });
        let response = self.inner.put(&url).json(&body).send().await?;
        decode(response).await
    }

    /// Agents currently typing on a task.
    pub async fn typing_agents(&self, task_id: &str) -> Result<TypingAgents, ClientError> {
        self.get_json(&format!("/v1/tasks/{}/typing", task_id)).await
    }

    /// Record that an agent read the latest message on a task.
    pub async fn mark_read(&self, task_id: &str, agent_id: &str) -> Result<TypingState, ClientError> {
        let url = self.url(&format!("/v1/tasks/{}/agents/{}/read", task_id, agent_id));
        debug!(url = %url, "Marking read");

        let response = self.inner.post(&url).send().await?;
        decode(response).await
    }

    /// Most recent activity entries, newest first.
    pub async fn activities(&self, limit: usize) -> Result<Vec<Activity>, ClientError> {
        self.get_json(&format!("/v1/activities?limit={}", limit)).await
    }

    /// Get JSON from an endpoint.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!(url = %url, "GET request");

        let response = self.inner.get(&url).send().await?;
        decode(response).await
    }
}

/// Decode a success body, or turn an error payload into [`ClientError::Api`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await?;
        return Err(api_error(status.as_u16(), &text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Serialization(e.to_string()))
}

fn api_error(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => ClientError::Api {
            status: err.status,
            message: err.message,
        },
        // Proxies and panics don't speak our error format.
        Err(_) => ClientError::Api {
            status,
            message: body.trim().to_string(),
        },
    }
}
