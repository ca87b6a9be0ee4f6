//! HiPay MCP server over stdio.
//!
//! # Usage
//!
//! ```bash
//! hipay-mcp-server --tools=all --username=$USERNAME --password=$PASSWORD
//!
//! # Credentials from the environment, or from a .env file
//! HIPAY_USERNAME=... HIPAY_PASSWORD=... hipay-mcp-server --tools=transactions.get,transactions.update
//!
//! # Configure logging level
//! RUST_LOG=debug hipay-mcp-server --tools=all --environment=production
//! ```
//!
//! # Environment Variables
//!
//! - `HIPAY_USERNAME` / `HIPAY_PASSWORD` - Credentials when no flag is given
//! - `HIPAY_ENVIRONMENT` - `stage` (default) or `production`
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! Stdout carries the MCP transport, so logs are written to stderr.

use hipay_mcp::HiPayMcpServer;
use hipay_mcp_server::ServerConfig;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Error initializing HiPay MCP server: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;
    tracing::info!(
        environment = %config.credentials.environment(),
        tools = ?config.tools,
        "Loaded configuration"
    );

    let server = HiPayMcpServer::from_credentials(config.credentials, &config.tools)?;
    let service = server.serve(rmcp::transport::stdio()).await?;
    tracing::info!("HiPay MCP Server running on stdio");

    let reason = service.waiting().await?;
    tracing::info!(?reason, "HiPay MCP Server stopped");
    Ok(())
}
