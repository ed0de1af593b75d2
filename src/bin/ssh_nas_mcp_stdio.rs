#![deny(warnings)]
#![deny(clippy::unwrap_used)]

use std::sync::Arc;

use dotenv::dotenv;
use poem_mcpserver::McpServer;
use ssh_nas_mcp::mcp::{CommandExecutor, McpNasTools, NasConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().expect("valid directive")),
        )
        .init();

    let executor = Arc::new(CommandExecutor::from_config(NasConfig::from_env()));

    let served =
        poem_mcpserver::stdio::stdio(McpServer::new().tools(McpNasTools::new(executor.clone())))
            .await;

    executor.close().await;
    served?;
    Ok(())
}
