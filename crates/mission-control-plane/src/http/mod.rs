//! HTTP server for the control plane.
//!
//! Provides endpoints for:
//! - Agents (`/v1/agents`)
//! - Tasks, status changes and typing (`/v1/tasks`)
//! - Skills and documents (`/v1/skills`, `/v1/documents`)
//! - Activity feed (`/v1/activities`)
//! - MCP-style tools (`/v1/tools/*`)
//! - Health check (`/health`)
//! - Prometheus metrics (`/metrics`)

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod error;
mod handlers;
mod mcp;
pub mod responses;

pub use error::ApiError;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer for the dashboard
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Agents
        .route(
            "/v1/agents",
            get(handlers::list_agents).post(handlers::register_agent),
        )
        .route("/v1/agents/:agent_id", get(handlers::get_agent))
        // Tasks
        .route(
            "/v1/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/v1/tasks/:task_id", get(handlers::get_task))
        .route(
            "/v1/tasks/:task_id/status",
            patch(handlers::update_task_status),
        )
        .route("/v1/tasks/:task_id/typing", get(handlers::get_typing))
        .route(
            "/v1/tasks/:task_id/agents/:agent_id/read",
            post(handlers::mark_read),
        )
        .route(
            "/v1/tasks/:task_id/agents/:agent_id/delivery",
            post(handlers::mark_delivery_started),
        )
        .route(
            "/v1/tasks/:task_id/agents/:agent_id/delivery-ended",
            post(handlers::mark_delivery_ended),
        )
        // Content
        .route("/v1/skills", get(handlers::list_skills))
        .route(
            "/v1/skills/:slug",
            get(handlers::get_skill).put(handlers::put_skill),
        )
        .route(
            "/v1/documents/:slug",
            get(handlers::get_document).put(handlers::put_document),
        )
        .route("/v1/activities", get(handlers::list_activities))
        // MCP tools
        .route("/v1/tools/create_task", post(mcp::create_task))
        .route("/v1/tools/list_tasks", post(mcp::list_tasks))
        .route(
            "/v1/tools/update_task_status",
            post(mcp::update_task_status),
        )
        // Observability routes
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
