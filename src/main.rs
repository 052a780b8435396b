use anyhow::Context as _;
use clap::Parser;
use docbundle_mcp::cli::Cli;
use docbundle_mcp::server::DocServer;
use docbundle_mcp::state::DocState;
use docbundle_mcp::store::{JsonFileStore, KeyValueStore, MemoryStore};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    docbundle_mcp::tracing::init(cli.log_json);

    let options = cli.options().context("Failed to read configuration")?;
    tracing::info!("Starting docbundle-mcp MCP server");
    tracing::debug!("Options: {:?}", options);

    let store: Arc<dyn KeyValueStore> = match &options.state_file {
        Some(path) => {
            let store = JsonFileStore::open(path);
            tracing::debug!("Persisting preferences to {}", store.path().display());
            Arc::new(store)
        }
        None => Arc::new(MemoryStore::new()),
    };
    let state = Arc::new(DocState::new(options, store));

    // Serve immediately; tools report "loading" until the corpus is ready
    let loader = Arc::clone(&state);
    tokio::spawn(async move {
        // failure is kept in the state and shown by every view
        let _ = loader.load().await;
    });

    let server = DocServer::new(state);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
