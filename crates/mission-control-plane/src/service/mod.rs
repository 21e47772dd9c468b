//! Domain services over the shared state.

mod agent_service;
mod content_service;
mod task_service;
mod typing_service;

pub use agent_service::AgentService;
pub use content_service::ContentService;
pub use task_service::{NewTask, TaskService};
pub use typing_service::{TypingEvent, TypingService};
