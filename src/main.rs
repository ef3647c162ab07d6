//! `dfs-trace-server`: serves the demo graph's DFS traces over HTTP.

use anyhow::Context;
use dfs_trace::config::ServerConfig;
use dfs_trace::graph::Graph;
use dfs_trace::server;
use dfs_trace::telemetry::init_tracing;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env();
    let graph = Arc::new(Graph::sample());

    server::serve(&config, graph)
        .await
        .with_context(|| format!("dfs trace server on port {} stopped", config.port))
}
