//! Skills and documents: slug-keyed markdown records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::validate_content_size;
use crate::{CoreError, TaskId};

/// A reusable skill an agent can load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// URL-safe unique key.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Skill body.
    pub content_markdown: String,
    /// When the skill was last written.
    pub updated_at: DateTime<Utc>,
}

impl Skill {
    /// Build a skill, rejecting bodies larger than `max_bytes`.
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        content_markdown: impl Into<String>,
        max_bytes: usize,
    ) -> Result<Self, CoreError> {
        let slug = validate_slug(slug.into())?;
        let content_markdown = content_markdown.into();
        validate_content_size(Some(&content_markdown), Some(&slug), max_bytes)?;

        Ok(Self {
            slug,
            name: name.into(),
            content_markdown,
            updated_at: Utc::now(),
        })
    }
}

/// A document attached to the board or to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// URL-safe unique key.
    pub slug: String,
    pub title: String,
    pub content_markdown: String,
    /// Task the document belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a document, rejecting bodies larger than `max_bytes`.
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        content_markdown: impl Into<String>,
        max_bytes: usize,
    ) -> Result<Self, CoreError> {
        let slug = validate_slug(slug.into())?;
        let content_markdown = content_markdown.into();
        validate_content_size(Some(&content_markdown), Some(&slug), max_bytes)?;

        Ok(Self {
            slug,
            title: title.into(),
            content_markdown,
            task_id: None,
            updated_at: Utc::now(),
        })
    }

    /// Builder method to attach the document to a task.
    pub fn with_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }
}

/// Slugs are lowercase ascii letters, digits, `-` and `_`.
pub fn validate_slug(slug: String) -> Result<String, CoreError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(slug)
    } else {
        Err(CoreError::InvalidInput(format!("slug '{}' must match [a-z0-9_-]+", slug)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_within_limit() {
        let skill = Skill::new("triage", "Triage", "# Triage\n", 64).unwrap();
        assert_eq!(skill.slug, "triage");
    }

    #[test]
    fn test_skill_over_limit_names_slug() {
        let err = Skill::new("triage", "Triage", "x".repeat(65), 64).unwrap_err();
        assert_eq!(
            err,
            CoreError::ContentTooLarge {
                key: Some("triage".to_string()),
                limit: 64,
                actual: 65,
            }
        );
    }

    #[test]
    fn test_document_with_task() {
        let task_id = TaskId::new("t-1");
        let doc = Document::new("brief", "Brief", "", 8)
            .unwrap()
            .with_task(task_id.clone());
        assert_eq!(doc.task_id, Some(task_id));
    }

    #[test]
    fn test_bad_slug() {
        assert!(matches!(
            Skill::new("Not A Slug", "x", "", 8),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(validate_slug(String::new()).is_err());
    }
}
