//! Request errors and their HTTP mapping.

use crate::graph::GraphError;
use crate::wire::WireError;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

/// Errors produced while answering `/dfs`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `start` was present but not an integer.
    #[error("start must be an integer in 0..{}", .vertex_count.saturating_sub(1))]
    InvalidStart {
        /// The raw query value.
        raw: String,
        /// Number of vertices in the served graph.
        vertex_count: usize,
    },

    /// `start` was an integer outside the graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The trace could not be encoded.
    #[error(transparent)]
    Wire(#[from] WireError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidStart { .. } | ApiError::Graph(_) => StatusCode::BAD_REQUEST,
            ApiError::Wire(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "dfs request failed");
        } else {
            warn!(error = %self, "rejected dfs request");
        }
        (
            status,
            [(header::CONTENT_TYPE, super::TEXT_PLAIN)],
            format!("Error: {self}\n"),
        )
            .into_response()
    }
}
