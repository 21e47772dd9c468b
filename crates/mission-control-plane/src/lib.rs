//! Mission Control Plane Library
//!
//! This crate provides the HTTP API, MCP tools, metrics and in-memory state
//! for the Mission Control board. Business rules live in `mission-core`;
//! everything here is request plumbing around them.

pub mod config;
pub mod http;
pub mod mcp;
pub mod metrics;
pub mod service;
pub mod state;

pub use config::Config;
pub use service::{AgentService, ContentService, TaskService, TypingService};
pub use state::AppState;
