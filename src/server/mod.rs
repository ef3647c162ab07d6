//! HTTP facade over the tracer.
//!
//! # Routes
//!
//! - `GET /` serves the step-by-step viewer page.
//! - `GET /dfs?start=<v>&format=json` returns the JSON trace payload.
//! - `GET /dfs?start=<v>` returns the legacy plain-text transcript.
//! - `GET /dfs` without `start` returns a usage line.
//!
//! The graph is shared read-only between requests; every request runs its
//! own traversal and owns the resulting trace.

pub mod error;

pub use error::ApiError;

use crate::config::{ConfigError, ServerConfig};
use crate::graph::Graph;
use crate::render::legacy_report;
use crate::traversal::run_trace_raw;
use crate::wire::TracePayload;
use axum::extract::{RawQuery, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};
use url::form_urlencoded;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json; charset=utf-8";

/// The viewer page.
pub const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Errors that stop the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    graph: Arc<Graph>,
}

impl AppState {
    /// Wraps the graph every request will traverse.
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    /// The served graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

/// Query parameters of `/dfs`.
///
/// Both are kept as raw strings so malformed values are reported by the
/// handler instead of being rejected by an extractor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DfsQuery {
    /// Start vertex.
    pub start: Option<String>,
    /// `json` (any case) selects the JSON payload; anything else is text.
    pub format: Option<String>,
}

impl DfsQuery {
    /// Reads `start` and `format` from a raw query string.
    ///
    /// Pairs without `=` are skipped, a repeated key keeps its last value,
    /// and unknown keys are ignored.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let pairs = raw
            .unwrap_or_default()
            .split('&')
            .filter(|segment| segment.contains('='))
            .flat_map(|segment| form_urlencoded::parse(segment.as_bytes()).take(1));
        for (key, value) in pairs {
            match &*key {
                "start" => query.start = Some(value.into_owned()),
                "format" => query.format = Some(value.into_owned()),
                _ => {}
            }
        }
        query
    }

    fn wants_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Builds the router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/dfs", get(dfs_handler))
        .with_state(state)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn dfs_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Response, ApiError> {
    let query = DfsQuery::parse(raw.as_deref());
    let graph = state.graph();
    let vertex_count = graph.vertex_count();

    let Some(raw) = query.start.as_deref() else {
        let usage = format!(
            "Usage: /dfs?start=<vertex 0..{}>&format=json\n",
            vertex_count.saturating_sub(1)
        );
        return Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], usage).into_response());
    };

    let start: i64 = raw.parse().map_err(|_| ApiError::InvalidStart {
        raw: raw.to_string(),
        vertex_count,
    })?;
    let trace = run_trace_raw(graph, start)?;
    debug!(start, steps = trace.len(), json = query.wants_json(), "dfs request");

    if query.wants_json() {
        let body = TracePayload::new(graph, &trace).to_json()?;
        Ok(([(header::CONTENT_TYPE, APPLICATION_JSON)], body).into_response())
    } else {
        let body = legacy_report(graph, &trace);
        Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response())
    }
}

/// Binds `config`'s address and serves `graph` until Ctrl-C.
pub async fn serve(config: &ServerConfig, graph: Arc<Graph>) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(
        "dfs trace server listening on http://{} ({} vertices)",
        addr,
        graph.vertex_count()
    );

    let router = create_router(AppState::new(graph));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
