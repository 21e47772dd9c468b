//! Mission Control Plane Server

use std::net::SocketAddr;

use clap::Parser;
use mission_core::ErrorRule;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mission_control_plane::config::Config;
use mission_control_plane::{http, mcp, AppState};

/// Mission Control HTTP and MCP server.
#[derive(Parser, Debug)]
#[command(name = "mission-control-plane", about = "Mission Control HTTP and MCP server")]
struct Args {
    /// HTTP server address
    #[arg(long, env = "MISSION_HTTP_ADDR", default_value = "[::1]:50052")]
    http_addr: String,

    /// Maximum size of a skill or document body, in bytes
    #[arg(long, env = "MISSION_MAX_CONTENT_BYTES", default_value_t = mission_core::MAX_CONTENT_MARKDOWN_BYTES)]
    max_content_bytes: usize,

    /// Number of activity feed entries kept in memory
    #[arg(long, env = "MISSION_ACTIVITY_FEED_LIMIT", default_value_t = 500)]
    activity_feed_limit: usize,

    /// Extra error rule as SUBSTRING=STATUS, checked before the defaults (repeatable)
    #[arg(long = "error-rule", env = "MISSION_ERROR_RULES", value_delimiter = ',')]
    error_rules: Vec<ErrorRule>,
}

impl Args {
    fn into_config(self) -> Config {
        let mut error_rules = self.error_rules;
        error_rules.extend(Config::default_error_rules());

        Config {
            http_bind_addr: self.http_addr,
            max_content_bytes: self.max_content_bytes,
            activity_feed_limit: self.activity_feed_limit,
            error_rules,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mission=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = args.into_config();
    let http_addr: SocketAddr = config.http_bind_addr.parse()?;

    info!(
        http_addr = %http_addr,
        max_content_bytes = config.max_content_bytes,
        error_rules = config.error_rules.len(),
        "Starting Mission Control plane"
    );

    let state = AppState::new(config);
    let ct = CancellationToken::new();

    let router = http::create_router(state.clone()).merge(mcp::create_mcp_router(state, ct.clone()));

    let listener = TcpListener::bind(http_addr).await?;
    info!("HTTP server listening on {} (REST + MCP at /mcp)", http_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
            }
            ct.cancel();
        })
        .await?;

    info!("Mission Control plane stopped");
    Ok(())
}
