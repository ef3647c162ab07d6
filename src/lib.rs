//! dfs-trace: step-by-step depth-first traversal traces.
//!
//! The crate runs an explicit-stack depth-first search over a small,
//! immutable undirected graph and records every PUSH, VISIT and POP together
//! with a snapshot of the stack and visited flags. The resulting [`Trace`] can
//! be replayed forward or backward, serialized to the JSON payload the viewer
//! consumes, or rendered as a plain-text transcript.
//!
//! # Layout
//!
//! - [`graph`]: the immutable adjacency model and its builder.
//! - [`traversal`]: the depth-first tracer.
//! - [`trace`]: steps, traces and replay cursors.
//! - [`wire`] and [`render`]: JSON payload and legacy text output.
//! - [`config`], [`telemetry`], [`server`]: the HTTP boundary.
//!
//! # Example
//!
//! ```
//! use dfs_trace::prelude::*;
//!
//! let graph = GraphBuilder::new(4)
//!     .unwrap()
//!     .with_edges([(0, 1), (1, 2), (0, 2)])
//!     .unwrap()
//!     .build();
//! let trace = run_trace(&graph, VertexId::new(0)).unwrap();
//! let order: Vec<usize> = trace.visited_order().iter().map(|v| v.index()).collect();
//! assert_eq!(order, vec![0, 1, 2]);
//! ```

pub mod config;
pub mod graph;
pub mod render;
pub mod server;
pub mod telemetry;
pub mod trace;
pub mod traversal;
pub mod wire;

pub use graph::{Graph, GraphBuilder, GraphError, VertexId};
pub use trace::{Step, StepAction, Trace, TraceCursor};
pub use traversal::{run_trace, run_trace_raw, DfsTracer};
pub use wire::{TraceDocument, TracePayload, WireError};

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::graph::{Graph, GraphBuilder, GraphError, VertexId};
    pub use crate::render::{adjacency_text, legacy_report, trace_transcript};
    pub use crate::trace::{Step, StepAction, Trace, TraceCursor, AUTOPLAY_INTERVAL};
    pub use crate::traversal::{run_trace, run_trace_raw, DfsTracer};
    pub use crate::wire::{TraceDocument, TracePayload, WireError};
}
