//! missionctl - Command line interface for the Mission Control plane.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use mission_admin_client::{CreateTaskRequest, HttpClient};
use mission_core::{classify_error, Activity, Agent, AgentRole, ErrorRule, Task};

/// missionctl - Mission Control management tool
#[derive(Parser)]
#[command(name = "missionctl")]
#[command(about = "CLI for the Mission Control plane", long_about = None)]
struct Cli {
    /// Control plane HTTP address
    #[arg(short, long, env = "MISSION_ADDR", default_value = "http://[::1]:50052")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new task
    #[command(name = "create-task")]
    CreateTask {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Requested status (the server may override it)
        #[arg(short, long)]
        status: Option<String>,

        /// Priority (low, medium, high, urgent)
        #[arg(short, long)]
        priority: Option<String>,

        /// Agent to assign (repeatable)
        #[arg(long = "assignee")]
        assignees: Vec<String>,

        /// Agent creating the task
        #[arg(long)]
        created_by: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Get a task
    #[command(name = "get-task")]
    GetTask {
        /// Task ID
        id: String,
    },

    /// List tasks, newest first
    #[command(name = "list-tasks")]
    ListTasks {
        /// Only show tasks in this status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Move a task to a new status
    #[command(name = "set-status")]
    SetStatus {
        /// Task ID
        id: String,

        /// New status
        status: String,

        /// Agent making the change
        #[arg(long)]
        by: Option<String>,
    },

    /// Register or update an agent
    #[command(name = "register-agent")]
    RegisterAgent {
        /// Agent ID
        id: String,

        /// Display name (defaults to the ID)
        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, value_enum, default_value_t = Role::Specialist)]
        role: Role,
    },

    /// List registered agents
    #[command(name = "list-agents")]
    ListAgents,

    /// Upload a skill from a markdown file
    #[command(name = "put-skill")]
    PutSkill {
        /// Skill slug ([a-z0-9_-])
        slug: String,

        /// Markdown file to upload
        file: PathBuf,

        /// Display name (defaults to the slug)
        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// Show agents currently typing on a task
    Typing {
        /// Task ID
        task_id: String,
    },

    /// Show the activity feed
    Activities {
        /// Number of entries
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Classify an error message locally, without contacting the server
    Classify {
        /// Error message
        message: String,

        /// Custom rule as SUBSTRING=STATUS (repeatable, checked in order)
        #[arg(long = "rule")]
        rules: Vec<ErrorRule>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Role {
    Orchestrator,
    Specialist,
}

impl From<Role> for AgentRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Orchestrator => AgentRole::Orchestrator,
            Role::Specialist => AgentRole::Specialist,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = HttpClient::new(&cli.addr);

    match cli.command {
        Commands::CreateTask {
            title,
            description,
            status,
            priority,
            assignees,
            created_by,
            tags,
        } => {
            let request = CreateTaskRequest {
                title,
                description,
                status,
                priority,
                assignee_ids: assignees,
                created_by,
                tags,
            };
            let task = client.create_task(&request).await?;
            println!("Task created:");
            print_task(&task);
        }
        Commands::GetTask { id } => {
            let task = client.get_task(&id).await?;
            print_task(&task);
        }
        Commands::ListTasks { status } => {
            let tasks = client.list_tasks(status.as_deref()).await?;
            print_tasks(&tasks);
        }
        Commands::SetStatus { id, status, by } => {
            let task = client.update_task_status(&id, &status, by.as_deref()).await?;
            println!("Task updated:");
            print_task(&task);
        }
        Commands::RegisterAgent { id, name, role } => {
            let agent = client.register_agent(&id, &name, role.into()).await?;
            println!("Agent registered:");
            print_agents(std::slice::from_ref(&agent));
        }
        Commands::ListAgents => {
            let agents = client.list_agents().await?;
            print_agents(&agents);
        }
        Commands::PutSkill { slug, file, name } => {
            let content = std::fs::read_to_string(&file)?;
            let skill = client.put_skill(&slug, &name, &content).await?;
            println!(
                "Skill '{}' saved ({} bytes)",
                skill.slug,
                skill.content_markdown.len()
            );
        }
        Commands::Typing { task_id } => {
            let typing = client.typing_agents(&task_id).await?;
            if typing.agent_ids.is_empty() {
                println!("Nobody is typing on {}", typing.task_id);
            } else {
                println!("Typing on {}: {}", typing.task_id, typing.agent_ids.join(", "));
            }
        }
        Commands::Activities { limit } => {
            let activities = client.activities(limit).await?;
            print_activities(&activities);
        }
        Commands::Classify { message, rules } => {
            let classified = classify_error(&message, &rules);
            println!("{}", serde_json::to_string_pretty(&classified)?);
        }
    }

    Ok(())
}

fn print_task(task: &Task) {
    println!("  ID:         {}", task.id);
    println!("  Title:      {}", task.title);
    println!("  Status:     {}", task.status);
    println!("  Priority:   {}", task.priority);
    println!("  Assignees:  {}", join_ids(&task.assignee_ids));
    if let Some(creator) = &task.created_by {
        println!("  Created by: {}", creator);
    }
    println!("  Created:    {}", format_datetime(&task.created_at));
    println!("  Updated:    {}", format_datetime(&task.updated_at));

    if !task.tags.is_empty() {
        println!("  Tags:       {}", task.tags.join(", "));
    }
    if !task.description.is_empty() {
        println!();
        println!("{}", task.description);
    }
}

fn print_tasks(tasks: &[Task]) {
    println!("Tasks ({}):", tasks.len());
    println!("{:<36}  {:<12}  {:<8}  {:<20}  {}", "ID", "STATUS", "PRIORITY", "ASSIGNEES", "TITLE");
    println!("{}", "-".repeat(100));

    for task in tasks {
        println!(
            "{:<36}  {:<12}  {:<8}  {:<20}  {}",
            task.id,
            task.status,
            task.priority,
            join_ids(&task.assignee_ids),
            task.title
        );
    }
}

fn print_agents(agents: &[Agent]) {
    println!("Agents ({}):", agents.len());
    println!("{:<20}  {:<14}  {:<8}  {}", "ID", "ROLE", "STATUS", "NAME");
    println!("{}", "-".repeat(64));

    for agent in agents {
        println!(
            "{:<20}  {:<14}  {:<8}  {}",
            agent.id,
            agent.role.as_str(),
            agent.status.as_str(),
            agent.name
        );
    }
}

fn print_activities(activities: &[Activity]) {
    println!("Activities ({}):", activities.len());
    for activity in activities {
        let agent = activity
            .agent_id
            .as_ref()
            .map(|a| a.as_str())
            .unwrap_or("-");
        println!(
            "{}  {:<12}  {}",
            format_timestamp(activity.timestamp_ms),
            agent,
            activity.message
        );
    }
}

fn join_ids<T: std::fmt::Display>(ids: &[T]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| format_datetime(&dt))
        .unwrap_or_else(|| ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_classify_parses_rules_in_order() {
        let cli = Cli::try_parse_from([
            "missionctl",
            "classify",
            "widget not found",
            "--rule",
            "widget=409",
            "--rule",
            "not found=410",
        ])
        .unwrap();

        match cli.command {
            Commands::Classify { message, rules } => {
                assert_eq!(rules.len(), 2);
                assert_eq!(classify_error(&message, &rules).status, 409);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_bad_rule_is_rejected() {
        let result = Cli::try_parse_from(["missionctl", "classify", "boom", "--rule", "boom"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(join_ids::<String>(&[]), "-");
    }
}
