//! HTTP request handlers.

mod activities;
mod agents;
mod content;
mod health;
mod tasks;
mod typing;

pub use activities::list_activities;
pub use agents::{get_agent, list_agents, register_agent};
pub use content::{get_document, get_skill, list_skills, put_document, put_skill};
pub use health::{health_check, metrics_handler};
pub use tasks::{create_task, get_task, get_typing, list_tasks, update_task_status};
pub use typing::{mark_delivery_ended, mark_delivery_started, mark_read};
