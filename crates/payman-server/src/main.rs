//! Payman MCP Server
//!
//! Exposes the Payman payment API as MCP tools over stdio, so an agent can
//! create payees, send payments, search payees and check its balance.
//!
//! stdout carries the protocol; all logging goes to stderr.

mod config;
mod handlers;
mod state;
mod transport;

use payman_core::ToolRegistry;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{SERVER_NAME, SERVER_VERSION, ServerConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();

    let client = config.client()?;
    tracing::info!(base_url = client.base_url(), "Payman API configured");

    // Initialize tools
    let mut tools = ToolRegistry::new();
    payman_tools::register_tools(&mut tools, &client);

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let mut state = AppState::new(tools);

    tracing::info!("{} v{} running on stdio", SERVER_NAME, SERVER_VERSION);
    transport::serve(
        &mut state,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
