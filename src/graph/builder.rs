//! Construction of [`Graph`] values.
//!
//! Edges may be added in any order and may repeat; `build` sorts and
//! deduplicates every adjacency list once, so the resulting graph (and any
//! traversal over it) does not depend on insertion order.

use super::{Graph, GraphError, VertexId};

/// Accumulates undirected edges for a fixed number of vertices.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    adjacency: Vec<Vec<VertexId>>,
}

impl GraphBuilder {
    /// Creates a builder for `vertex_count` isolated vertices.
    ///
    /// Fails with [`GraphError::EmptyGraph`] when `vertex_count` is zero.
    pub fn new(vertex_count: usize) -> Result<Self, GraphError> {
        if vertex_count == 0 {
            return Err(GraphError::EmptyGraph);
        }
        Ok(Self::with_vertex_count(vertex_count))
    }

    pub(crate) fn with_vertex_count(vertex_count: usize) -> Self {
        debug_assert!(vertex_count > 0);
        Self {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Number of vertices the graph will have.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds the undirected edge `(u, v)`.
    ///
    /// Both endpoints must be in `[0, vertex_count)`; otherwise nothing is
    /// inserted and [`GraphError::VertexOutOfRange`] names the first bad one.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<&mut Self, GraphError> {
        let (u, v) = (VertexId::new(u), VertexId::new(v));
        for endpoint in [u, v] {
            if endpoint.index() >= self.adjacency.len() {
                return Err(GraphError::out_of_range(endpoint, self.adjacency.len()));
            }
        }
        self.link(u, v);
        Ok(self)
    }

    /// Adds every edge from `edges`, stopping at the first invalid one.
    pub fn with_edges<I>(mut self, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        for (u, v) in edges {
            self.add_edge(u, v)?;
        }
        Ok(self)
    }

    /// Inserts both directions of an edge whose endpoints are known valid.
    pub(crate) fn link(&mut self, u: VertexId, v: VertexId) {
        self.adjacency[u.index()].push(v);
        self.adjacency[v.index()].push(u);
    }

    /// Finalizes the graph: every list is sorted ascending and deduplicated.
    pub fn build(mut self) -> Graph {
        for list in &mut self.adjacency {
            list.sort_unstable();
            list.dedup();
        }
        Graph::from_sorted(self.adjacency)
    }
}
