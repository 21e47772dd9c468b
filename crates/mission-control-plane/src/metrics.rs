//! Prometheus metrics collection and formatting.
//!
//! This module provides metrics in Prometheus text exposition format.

use std::fmt::Write;
use std::sync::Arc;

use mission_core::{AgentRole, TaskStatus};

use crate::state::AppState;

/// Collect all metrics from AppState and format as Prometheus text.
pub async fn collect_metrics(state: &Arc<AppState>) -> String {
    let mut output = String::new();

    collect_agent_metrics(state, &mut output).await;
    collect_task_metrics(state, &mut output).await;
    collect_typing_metrics(state, &mut output).await;

    output
}

/// Collect agent metrics by role.
async fn collect_agent_metrics(state: &Arc<AppState>, output: &mut String) {
    let agents = state.agents.read().await;

    let mut orchestrator = 0u64;
    let mut specialist = 0u64;
    for agent in agents.values() {
        match agent.role {
            AgentRole::Orchestrator => orchestrator += 1,
            AgentRole::Specialist => specialist += 1,
        }
    }

    writeln!(
        output,
        "# HELP mission_agents_registered Number of registered agents by role"
    )
    .ok();
    writeln!(output, "# TYPE mission_agents_registered gauge").ok();
    writeln!(
        output,
        "mission_agents_registered{{role=\"orchestrator\"}} {orchestrator}"
    )
    .ok();
    writeln!(
        output,
        "mission_agents_registered{{role=\"specialist\"}} {specialist}"
    )
    .ok();
}

/// Collect task metrics by status.
async fn collect_task_metrics(state: &Arc<AppState>, output: &mut String) {
    let tasks = state.tasks.read().await;

    let mut counts = vec![0u64; TaskStatus::ALL.len()];
    for task in tasks.values() {
        if let Some(idx) = TaskStatus::ALL.iter().position(|s| *s == task.status) {
            counts[idx] += 1;
        }
    }

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP mission_tasks_total Total number of tasks by status"
    )
    .ok();
    writeln!(output, "# TYPE mission_tasks_total gauge").ok();
    for (status, count) in TaskStatus::ALL.iter().zip(counts) {
        writeln!(
            output,
            "mission_tasks_total{{status=\"{}\"}} {}",
            status.as_str(),
            count
        )
        .ok();
    }
}

/// Collect the number of (task, agent) pairs currently typing.
async fn collect_typing_metrics(state: &Arc<AppState>, output: &mut String) {
    let typing = state
        .typing
        .read()
        .await
        .values()
        .filter(|s| s.is_typing())
        .count();

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP mission_agents_typing Agent/task pairs with an open typing window"
    )
    .ok();
    writeln!(output, "# TYPE mission_agents_typing gauge").ok();
    writeln!(output, "mission_agents_typing {typing}").ok();
}
