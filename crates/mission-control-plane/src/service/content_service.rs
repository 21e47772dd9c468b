//! Skill and document storage.

use std::sync::Arc;

use tracing::{info, warn};

use mission_core::{Activity, ActivityKind, CoreError, Document, Skill, TaskId};

use crate::state::AppState;

/// ContentService implementation.
#[derive(Clone)]
pub struct ContentService {
    state: Arc<AppState>,
}

impl ContentService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Create or replace a skill.
    pub async fn put_skill(
        &self,
        slug: &str,
        name: &str,
        content_markdown: &str,
    ) -> Result<Skill, CoreError> {
        let skill = Skill::new(slug, name, content_markdown, self.state.config.max_content_bytes)
            .map_err(|e| {
                warn!(slug = %slug, error = %e, "Rejected skill");
                e
            })?;

        self.state
            .skills
            .write()
            .await
            .insert(skill.slug.clone(), skill.clone());

        info!(slug = %skill.slug, bytes = skill.content_markdown.len(), "Saved skill");
        self.state
            .record_activity(Activity::new(
                ActivityKind::SkillSaved,
                format!("Saved skill {}", skill.slug),
            ))
            .await;

        Ok(skill)
    }

    pub async fn get_skill(&self, slug: &str) -> Result<Skill, CoreError> {
        self.state
            .skills
            .read()
            .await
            .get(slug)
            .cloned()
            .ok_or_else(|| CoreError::ContentNotFound(slug.to_string()))
    }

    /// List skills sorted by slug.
    pub async fn list_skills(&self) -> Vec<Skill> {
        let mut skills: Vec<Skill> = self.state.skills.read().await.values().cloned().collect();
        skills.sort_by(|a, b| a.slug.cmp(&b.slug));
        skills
    }

    /// Create or replace a document, optionally attached to a task.
    pub async fn put_document(
        &self,
        slug: &str,
        title: &str,
        content_markdown: &str,
        task_id: Option<TaskId>,
    ) -> Result<Document, CoreError> {
        let mut document =
            Document::new(slug, title, content_markdown, self.state.config.max_content_bytes)
                .map_err(|e| {
                    warn!(slug = %slug, error = %e, "Rejected document");
                    e
                })?;

        if let Some(task_id) = task_id {
            if !self.state.tasks.read().await.contains_key(&task_id) {
                return Err(CoreError::TaskNotFound(task_id.to_string()));
            }
            document = document.with_task(task_id);
        }

        self.state
            .documents
            .write()
            .await
            .insert(document.slug.clone(), document.clone());

        info!(slug = %document.slug, bytes = document.content_markdown.len(), "Saved document");

        let mut activity = Activity::new(
            ActivityKind::DocumentSaved,
            format!("Saved document {}", document.slug),
        );
        if let Some(task_id) = &document.task_id {
            activity = activity.for_task(task_id.clone());
        }
        self.state.record_activity(activity).await;

        Ok(document)
    }

    pub async fn get_document(&self, slug: &str) -> Result<Document, CoreError> {
        self.state
            .documents
            .read()
            .await
            .get(slug)
            .cloned()
            .ok_or_else(|| CoreError::ContentNotFound(slug.to_string()))
    }
}
