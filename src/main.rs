#![deny(warnings)]
#![deny(clippy::unwrap_used)]

use std::sync::Arc;

use dotenv::dotenv;
use poem::{EndpointExt, Route, Server, listener::TcpListener, middleware::Tracing};
use poem_mcpserver::{McpServer, streamable_http};
use ssh_nas_mcp::mcp::{CommandExecutor, McpNasTools, NasConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Initialize logging with proper tracing default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().expect("valid directive")),
        )
        .init();

    let config = NasConfig::from_env();
    if config.is_configured() {
        info!("NAS target: {}@{}", config.user, config.address());
    } else {
        warn!("NAS credentials not configured. Set NAS_HOST, NAS_USER, and NAS_PASSWORD.");
    }
    let executor = Arc::new(CommandExecutor::from_config(config));

    // Setup MCP server
    let mcp_port: u16 = std::env::var("MCP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let mcp_addr = format!("0.0.0.0:{}", mcp_port);
    info!("Starting MCP server on {}", mcp_addr);

    // Every MCP session shares the one NAS connection
    let tools_executor = executor.clone();
    let app = Route::new()
        .at(
            "/",
            streamable_http::endpoint(move |_| {
                McpServer::new().tools(McpNasTools::new(tools_executor.clone()))
            }),
        )
        .with(Tracing);

    info!("MCP Server for NAS administration is ready");

    let served = Server::new(TcpListener::bind(mcp_addr))
        .name("SSH NAS MCP Server")
        .run(app)
        .await;

    executor.close().await;
    served?;

    Ok(())
}
