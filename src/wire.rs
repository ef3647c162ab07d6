//! JSON payload served to the viewer.
//!
//! ```text
//! {
//!   "adj":   { "0": [1, 7], ... },
//!   "start": 0,
//!   "steps": [ { "action": "PUSH", "node": 0, "stack": [0], "visited": [false, ...] }, ... ],
//!   "visitedOrder": [0, 1, ...]
//! }
//! ```
//!
//! Field names and nesting are the compatibility surface; `adj` keys are
//! written in ascending numeric order so identical traces serialize to
//! identical bytes.

use crate::graph::{Graph, VertexId};
use crate::trace::{Step, Trace};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error raised while encoding or decoding a payload.
#[derive(Debug, thiserror::Error)]
#[error("trace payload encoding failed: {0}")]
pub struct WireError(#[from] serde_json::Error);

/// Borrowed view of a graph and one of its traces, ready to serialize.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TracePayload<'a> {
    adj: AdjacencyMap<'a>,
    start: VertexId,
    steps: &'a [Step],
    #[serde(rename = "visitedOrder")]
    visited_order: &'a [VertexId],
}

impl<'a> TracePayload<'a> {
    /// Pairs `trace` with the adjacency of the graph it was produced from.
    pub fn new(graph: &'a Graph, trace: &'a Trace) -> Self {
        Self {
            adj: AdjacencyMap(graph),
            start: trace.start(),
            steps: trace.steps(),
            visited_order: trace.visited_order(),
        }
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON encoding, for humans.
    pub fn to_json_pretty(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serializes adjacency lists as a map keyed by vertex id.
#[derive(Debug, Clone, Copy)]
struct AdjacencyMap<'a>(&'a Graph);

impl Serialize for AdjacencyMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.vertex_count()))?;
        for (v, neighbors) in self.0.adjacency() {
            map.serialize_entry(&v.index().to_string(), neighbors)?;
        }
        map.end()
    }
}

/// Owned form of the payload, as read back by clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraceDocument {
    /// Adjacency lists keyed by vertex id.
    pub adj: BTreeMap<usize, Vec<VertexId>>,
    /// Start vertex.
    pub start: VertexId,
    /// Recorded steps in order.
    pub steps: Vec<Step>,
    /// First-visit order.
    #[serde(rename = "visitedOrder")]
    pub visited_order: Vec<VertexId>,
}

impl TraceDocument {
    /// Parses a payload produced by [`TracePayload::to_json`].
    pub fn from_json(json: &str) -> Result<Self, WireError> {
        Ok(serde_json::from_str(json)?)
    }
}
