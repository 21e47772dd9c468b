//! Admin client library for the Mission Control plane.
//!
//! Wraps the `/v1` REST API in typed calls returning `mission-core` types.

pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::{CreateTaskRequest, HttpClient, TypingAgents};
