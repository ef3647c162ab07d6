//! Immutable undirected graph model.
//!
//! A [`Graph`] is built once through a [`GraphBuilder`] and never changes
//! afterwards, so it can be shared read-only (typically behind an `Arc`) by
//! any number of concurrent traversals.
//!
//! # Invariants
//! - Every adjacency list is sorted ascending and duplicate-free.
//! - Every neighbor id is in `[0, vertex_count)`.
//! - The relation is symmetric: `v ∈ adj[u]` iff `u ∈ adj[v]`.

pub mod builder;

pub use builder::GraphBuilder;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense vertex identifier.
///
/// A `VertexId` is only meaningful relative to the graph that validated it;
/// lookups on another graph are range-checked again.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(usize);

impl VertexId {
    /// Creates a new `VertexId` from a raw index.
    #[inline]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for VertexId {
    fn from(raw: usize) -> Self {
        Self(raw)
    }
}

/// Errors raised by graph construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A vertex id falls outside `[0, vertex_count)`.
    #[error("vertex {vertex} out of range 0..{}", .vertex_count.saturating_sub(1))]
    VertexOutOfRange {
        /// The offending id, as supplied by the caller.
        vertex: i64,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// A graph must have at least one vertex.
    #[error("graph must have at least one vertex")]
    EmptyGraph,
}

impl GraphError {
    pub(crate) fn out_of_range(vertex: VertexId, vertex_count: usize) -> Self {
        GraphError::VertexOutOfRange {
            vertex: i64::try_from(vertex.index()).unwrap_or(i64::MAX),
            vertex_count,
        }
    }
}

/// Fixed-size undirected graph with canonical (ascending) adjacency lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<VertexId>>,
}

impl Graph {
    /// Edges of the nine-vertex demo graph.
    pub const SAMPLE_EDGES: [(usize, usize); 14] = [
        (0, 1),
        (0, 7),
        (1, 2),
        (1, 7),
        (2, 3),
        (2, 8),
        (2, 5),
        (3, 4),
        (3, 5),
        (4, 5),
        (5, 6),
        (6, 7),
        (6, 8),
        (7, 8),
    ];

    /// Vertex count of the demo graph.
    pub const SAMPLE_VERTEX_COUNT: usize = 9;

    /// Builds the nine-vertex demo graph served by default.
    pub fn sample() -> Self {
        let mut builder = GraphBuilder::with_vertex_count(Self::SAMPLE_VERTEX_COUNT);
        for (u, v) in Self::SAMPLE_EDGES {
            builder.link(VertexId::new(u), VertexId::new(v));
        }
        builder.build()
    }

    pub(crate) fn from_sorted(adjacency: Vec<Vec<VertexId>>) -> Self {
        debug_assert!(!adjacency.is_empty());
        Self { adjacency }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges (a self-loop counts once).
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Returns `true` iff `v` is in `[0, vertex_count)`.
    #[inline]
    pub fn is_valid_vertex(&self, v: VertexId) -> bool {
        v.index() < self.adjacency.len()
    }

    /// Checks an untrusted, possibly negative, id against this graph.
    pub fn resolve(&self, raw: i64) -> Result<VertexId, GraphError> {
        usize::try_from(raw)
            .ok()
            .map(VertexId::new)
            .filter(|v| self.is_valid_vertex(*v))
            .ok_or(GraphError::VertexOutOfRange {
                vertex: raw,
                vertex_count: self.vertex_count(),
            })
    }

    /// Returns the neighbors of `v` in ascending order.
    pub fn neighbors_of(&self, v: VertexId) -> Result<&[VertexId], GraphError> {
        self.adjacency
            .get(v.index())
            .map(Vec::as_slice)
            .ok_or_else(|| GraphError::out_of_range(v, self.vertex_count()))
    }

    /// Iterates over all vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.adjacency.len()).map(VertexId::new)
    }

    /// Iterates over `(vertex, neighbors)` pairs in ascending vertex order.
    pub fn adjacency(&self) -> impl Iterator<Item = (VertexId, &[VertexId])> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(i, list)| (VertexId::new(i), list.as_slice()))
    }

    /// Iterates over each undirected edge once, as `(u, v)` with `u <= v`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.adjacency().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .copied()
                .filter(move |&v| u <= v)
                .map(move |v| (u, v))
        })
    }
}
