//! Error types for the admin client.

use thiserror::Error;

/// Errors that can occur when using the admin client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The control plane answered with an error payload.
    #[error("{status}: {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// HTTP status reported by the control plane, if the failure came from it.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
