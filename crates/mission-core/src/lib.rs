//! Mission Control Core Domain Types
//!
//! This crate contains pure domain types and business rules with no
//! dependencies on:
//! - Network/HTTP
//! - Database
//! - Runtime specifics
//!
//! Every rule here is a synchronous, side-effect-free function and can be
//! called from any number of request handlers at once.

pub mod activity;
pub mod agent;
pub mod classify;
pub mod content;
pub mod error;
pub mod ids;
pub mod knowledge;
pub mod orchestrator;
pub mod status;
pub mod task;
pub mod typing;

// Re-export commonly used types
pub use activity::{Activity, ActivityKind};
pub use agent::{Agent, AgentRole};
pub use classify::{classify_error, ErrorClassification, ErrorRule};
pub use content::{validate_content_markdown, validate_content_size, MAX_CONTENT_MARKDOWN_BYTES};
pub use error::CoreError;
pub use ids::{ActivityId, AgentId, TaskId};
pub use knowledge::{Document, Skill};
pub use orchestrator::{filter_assignees, normalize_requested_status};
pub use status::{AgentStatus, TaskPriority, TaskStatus};
pub use task::{default_creation_status, Task};
pub use typing::{is_typing, TypingState};
