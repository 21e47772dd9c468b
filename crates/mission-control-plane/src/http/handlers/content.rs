//! Skill and document handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use mission_core::{Document, Skill, TaskId};

use crate::http::error::{ApiError, OrApiError};
use crate::http::responses::{PutDocumentRequest, PutSkillRequest};
use crate::service::ContentService;
use crate::state::AppState;

/// PUT /v1/skills/:slug
pub async fn put_skill(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    payload: Result<Json<PutSkillRequest>, JsonRejection>,
) -> Result<Json<Skill>, ApiError> {
    let Json(req) = payload?;
    let name = if req.name.is_empty() { &slug } else { &req.name };
    let skill = ContentService::new(state.clone())
        .put_skill(&slug, name, &req.content_markdown)
        .await
        .or_api_error(&state)?;
    Ok(Json(skill))
}

/// GET /v1/skills/:slug
pub async fn get_skill(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Skill>, ApiError> {
    let skill = ContentService::new(state.clone())
        .get_skill(&slug)
        .await
        .or_api_error(&state)?;
    Ok(Json(skill))
}

/// GET /v1/skills
pub async fn list_skills(State(state): State<Arc<AppState>>) -> Json<Vec<Skill>> {
    Json(ContentService::new(state).list_skills().await)
}

/// PUT /v1/documents/:slug
pub async fn put_document(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    payload: Result<Json<PutDocumentRequest>, JsonRejection>,
) -> Result<Json<Document>, ApiError> {
    let Json(req) = payload?;
    let title = if req.title.is_empty() { &slug } else { &req.title };
    let document = ContentService::new(state.clone())
        .put_document(
            &slug,
            title,
            &req.content_markdown,
            req.task_id.map(TaskId::from),
        )
        .await
        .or_api_error(&state)?;
    Ok(Json(document))
}

/// GET /v1/documents/:slug
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let document = ContentService::new(state.clone())
        .get_document(&slug)
        .await
        .or_api_error(&state)?;
    Ok(Json(document))
}
