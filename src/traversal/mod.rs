//! Traversal engines over [`Graph`](crate::graph::Graph).
//!
//! This module implements the explicit-stack depth-first tracer that records
//! every intermediate stack state as a [`Trace`](crate::trace::Trace).

pub mod dfs;

pub use dfs::{run_trace, run_trace_raw, DfsTracer};
