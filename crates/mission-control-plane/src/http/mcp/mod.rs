//! MCP-style HTTP tools.
//!
//! Plain JSON endpoints for agents that call tools over HTTP:
//! - `create_task` - Create a task (orchestrator rules applied)
//! - `list_tasks` - List tasks, optionally by status
//! - `update_task_status` - Move a task to a new status

mod tools;
mod types;

pub use tools::{create_task, list_tasks, update_task_status};
