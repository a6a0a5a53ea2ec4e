// Standalone MCP server binary

use anyhow::Result;
use mccmap_mcp::server::McpServer;
use mccmap_mcp::tools::*;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("mccmap MCP server starting...");

    // MCC reference files live under this directory (use ./data by default)
    let data_dir = std::env::var("MCCMAP_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let data_dir = PathBuf::from(data_dir);

    // Create tool registry and register the lookup tools
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GetBillCodesTool::new(data_dir.clone())));
    registry.register(Arc::new(GetMerchantCodesTool::new(data_dir.clone())));
    registry.register(Arc::new(GetCodeInfoTool::new(data_dir)));

    tracing::info!("Registered {} tools", registry.descriptors().len());

    // Serve until stdin closes
    let server = McpServer::new(registry);
    server.run().await?;

    Ok(())
}
