//! Error-to-response mapping for the HTTP API.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use mission_core::CoreError;

use crate::http::responses::ErrorResponse;
use crate::state::AppState;

/// A failed request, already classified into an HTTP status.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: String) -> Self {
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Request rejected");
        }
        Self { status, message }
    }

    /// Classify a domain error with the configured rules.
    pub fn classify(state: &AppState, err: &CoreError) -> Self {
        let classified = state.classify(err);
        let status =
            StatusCode::from_u16(classified.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, classified.message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: self.status.as_u16(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Shorthand for classifying a domain error at a handler boundary.
pub trait OrApiError<T> {
    fn or_api_error(self, state: &AppState) -> Result<T, ApiError>;
}

impl<T> OrApiError<T> for Result<T, CoreError> {
    fn or_api_error(self, state: &AppState) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::classify(state, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use mission_core::ErrorRule;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let state = AppState::default();
        let cases = [
            (CoreError::TaskNotFound("t".into()), 404),
            (CoreError::InvalidStatus("x".into()), 422),
            (CoreError::InvalidAgent("x".into()), 422),
            (CoreError::AgentNotFound("a".into()), 404),
            (CoreError::InvalidInput("title is required".into()), 400),
            (
                CoreError::ContentTooLarge {
                    key: Some("s".into()),
                    limit: 1,
                    actual: 2,
                },
                422,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::classify(&state, &err).status.as_u16(), status, "{}", err);
        }
    }

    #[test]
    fn test_ids_do_not_pick_the_status() {
        let state = AppState::default();
        let err = ApiError::classify(&state, &CoreError::TaskNotFound("forbidden".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Task not found: forbidden");

        let err = ApiError::classify(
            &state,
            &CoreError::ContentTooLarge {
                key: Some("unauthorized".into()),
                limit: 1,
                actual: 2,
            },
        );
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_configured_rules_apply() {
        let state = AppState::new(Config {
            error_rules: vec![ErrorRule::new("task not found", 410)],
            ..Config::default()
        });
        let err = ApiError::classify(&state, &CoreError::TaskNotFound("t".into()));
        assert_eq!(err.status, StatusCode::GONE);
    }
}
