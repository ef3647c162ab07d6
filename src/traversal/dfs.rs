//! Explicit-stack depth-first tracer.
//!
//! The tracer never recurses: the traversal stack is an ordinary vector so
//! that every intermediate state can be copied into the trace.
//!
//! # Determinism
//! - Neighbors are scanned in ascending id order (the graph's canonical
//!   order) and the first eligible one is pushed.
//! - A neighbor is eligible only if it is unvisited and not already on the
//!   stack.
//! - The same graph and start vertex always produce the same trace.

use crate::graph::{Graph, GraphError, VertexId};
use crate::trace::{Step, StepAction, Trace};
use tracing::debug;

/// Reusable depth-first tracer.
///
/// Buffers are kept between runs to avoid reallocating, but each call to
/// [`DfsTracer::run`] starts from a clean state and returns a trace that
/// shares nothing with the tracer.
#[derive(Debug, Default)]
pub struct DfsTracer {
    /// Traversal stack, bottom first (the top is the last element).
    stack: Vec<VertexId>,
    /// Visited flag per vertex.
    visited: Vec<bool>,
    /// Stack membership per vertex, mirrors `stack`.
    on_stack: Vec<bool>,
}

impl DfsTracer {
    /// Creates a tracer with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a full traversal of `graph` from `start`.
    ///
    /// Fails with [`GraphError::VertexOutOfRange`] before recording anything
    /// if `start` is not a vertex of `graph`.
    pub fn run(&mut self, graph: &Graph, start: VertexId) -> Result<Trace, GraphError> {
        if !graph.is_valid_vertex(start) {
            return Err(GraphError::out_of_range(start, graph.vertex_count()));
        }
        self.clear(graph.vertex_count());

        let mut trace = Trace::new(start);
        self.push(start);
        trace.record_step(self.snapshot(StepAction::Push, start));

        while let Some(&v) = self.stack.last() {
            if !self.visited[v.index()] {
                self.visited[v.index()] = true;
                trace.record_step(self.snapshot(StepAction::Visit, v));
            }

            let next = graph
                .neighbors_of(v)?
                .iter()
                .copied()
                .find(|u| !self.visited[u.index()] && !self.on_stack[u.index()]);

            match next {
                Some(u) => {
                    self.push(u);
                    trace.record_step(self.snapshot(StepAction::Push, u));
                }
                None => {
                    let popped = self.pop().unwrap_or(v);
                    trace.record_step(self.snapshot(StepAction::Pop, popped));
                }
            }
        }

        debug!(
            start = %start,
            steps = trace.len(),
            reached = trace.reachable_count(),
            vertices = graph.vertex_count(),
            "dfs trace complete"
        );
        Ok(trace)
    }

    /// Resets all buffers for a graph of `vertex_count` vertices.
    pub fn clear(&mut self, vertex_count: usize) {
        self.stack.clear();
        self.visited.clear();
        self.visited.resize(vertex_count, false);
        self.on_stack.clear();
        self.on_stack.resize(vertex_count, false);
    }

    fn push(&mut self, v: VertexId) {
        self.on_stack[v.index()] = true;
        self.stack.push(v);
    }

    fn pop(&mut self) -> Option<VertexId> {
        let v = self.stack.pop()?;
        self.on_stack[v.index()] = false;
        Some(v)
    }

    /// Copies the live state into a new step, stack listed top first.
    fn snapshot(&self, action: StepAction, node: VertexId) -> Step {
        Step {
            action,
            node,
            stack: self.stack.iter().rev().copied().collect(),
            visited: self.visited.clone(),
        }
    }
}

/// Runs a depth-first trace from `start` with a fresh tracer.
pub fn run_trace(graph: &Graph, start: VertexId) -> Result<Trace, GraphError> {
    DfsTracer::new().run(graph, start)
}

/// Like [`run_trace`], for untrusted signed ids such as query parameters.
pub fn run_trace_raw(graph: &Graph, start: i64) -> Result<Trace, GraphError> {
    let start = graph.resolve(start)?;
    run_trace(graph, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use proptest::prelude::*;
    use std::collections::{BTreeSet, HashSet};

    fn v(raw: usize) -> VertexId {
        VertexId::new(raw)
    }

    fn ids(raw: &[usize]) -> Vec<VertexId> {
        raw.iter().copied().map(VertexId::new).collect()
    }

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        GraphBuilder::new(n)
            .unwrap()
            .with_edges(edges.iter().copied())
            .unwrap()
            .build()
    }

    /// Vertices reachable from `start`, by plain set expansion.
    fn reachable(graph: &Graph, start: VertexId) -> BTreeSet<VertexId> {
        let mut seen = BTreeSet::from([start]);
        let mut frontier = vec![start];
        while let Some(u) = frontier.pop() {
            for &w in graph.neighbors_of(u).unwrap() {
                if seen.insert(w) {
                    frontier.push(w);
                }
            }
        }
        seen
    }

    #[test]
    fn sample_graph_from_zero() {
        let graph = Graph::sample();
        let trace = run_trace(&graph, v(0)).unwrap();
        assert_eq!(trace.visited_order(), ids(&[0, 1, 2, 3, 4, 5, 6, 7, 8]).as_slice());
        // 1 seed push + 8 discovery pushes + 9 visits + 9 pops.
        assert_eq!(trace.len(), 27);

        let last = trace.final_step().unwrap();
        assert_eq!(last.action, StepAction::Pop);
        assert_eq!(last.node, v(0));
        assert!(last.stack.is_empty());
        assert!(last.visited.iter().all(|&b| b));
    }

    #[test]
    fn triangle_exact_sequence() {
        let graph = graph(3, &[(0, 1), (1, 2), (0, 2)]);
        let trace = run_trace(&graph, v(0)).unwrap();
        let actions: Vec<(StepAction, usize, Vec<VertexId>)> = trace
            .steps()
            .iter()
            .map(|s| (s.action, s.node.index(), s.stack.clone()))
            .collect();
        assert_eq!(
            actions,
            vec![
                (StepAction::Push, 0, ids(&[0])),
                (StepAction::Visit, 0, ids(&[0])),
                (StepAction::Push, 1, ids(&[1, 0])),
                (StepAction::Visit, 1, ids(&[1, 0])),
                (StepAction::Push, 2, ids(&[2, 1, 0])),
                (StepAction::Visit, 2, ids(&[2, 1, 0])),
                (StepAction::Pop, 2, ids(&[1, 0])),
                (StepAction::Pop, 1, ids(&[0])),
                (StepAction::Pop, 0, ids(&[])),
            ]
        );
    }

    #[test]
    fn push_step_precedes_visit() {
        let graph = Graph::sample();
        let trace = run_trace(&graph, v(4)).unwrap();
        let first = trace.step(0).unwrap();
        assert_eq!(first.action, StepAction::Push);
        assert_eq!(first.node, v(4));
        assert_eq!(first.stack, ids(&[4]));
        assert!(first.visited.iter().all(|&b| !b));

        let second = trace.step(1).unwrap();
        assert_eq!(second.action, StepAction::Visit);
        assert!(second.visited[4]);
    }

    #[test]
    fn out_of_range_start() {
        let graph = Graph::sample();
        assert_eq!(
            run_trace(&graph, v(9)).unwrap_err(),
            GraphError::VertexOutOfRange { vertex: 9, vertex_count: 9 }
        );
        assert_eq!(
            run_trace_raw(&graph, -1).unwrap_err(),
            GraphError::VertexOutOfRange { vertex: -1, vertex_count: 9 }
        );
        assert!(run_trace_raw(&graph, 9).is_err());
        assert!(run_trace_raw(&graph, 8).is_ok());
    }

    #[test]
    fn isolated_vertex_never_visited() {
        // 3 has no edges.
        let graph = graph(5, &[(0, 1), (1, 2), (2, 4)]);
        for start in [0, 1, 2, 4] {
            let trace = run_trace(&graph, v(start)).unwrap();
            assert!(!trace.visited_order().contains(&v(3)));
            assert!(trace.steps().iter().all(|s| s.node != v(3) && !s.visited[3]));
        }

        let alone = run_trace(&graph, v(3)).unwrap();
        assert_eq!(alone.visited_order(), &[v(3)]);
        let actions: Vec<StepAction> = alone.steps().iter().map(|s| s.action).collect();
        assert_eq!(actions, vec![StepAction::Push, StepAction::Visit, StepAction::Pop]);
    }

    #[test]
    fn self_loop_is_harmless() {
        let graph = graph(2, &[(0, 0), (0, 1)]);
        let trace = run_trace(&graph, v(0)).unwrap();
        assert_eq!(trace.visited_order(), ids(&[0, 1]).as_slice());
        assert_eq!(trace.len(), 6);
    }

    #[test]
    fn tracer_reuse_keeps_earlier_traces_intact() {
        let graph = Graph::sample();
        let mut tracer = DfsTracer::new();
        let first = tracer.run(&graph, v(0)).unwrap();
        let snapshot = first.clone();
        let second = tracer.run(&graph, v(8)).unwrap();
        assert_eq!(first, snapshot);
        assert_ne!(first.visited_order(), second.visited_order());
        assert_eq!(tracer.run(&graph, v(0)).unwrap(), first);
    }

    #[test]
    fn tracer_adapts_to_graph_size() {
        let mut tracer = DfsTracer::new();
        let big = Graph::sample();
        let small = graph(2, &[(0, 1)]);
        tracer.run(&big, v(5)).unwrap();
        let trace = tracer.run(&small, v(1)).unwrap();
        assert_eq!(trace.step(0).unwrap().visited.len(), 2);
        assert_eq!(trace.visited_order(), ids(&[1, 0]).as_slice());
    }

    fn arb_graph() -> impl Strategy<Value = (Graph, usize)> {
        (1usize..12).prop_flat_map(|n| {
            (
                prop::collection::vec((0..n, 0..n), 0..n * 3),
                0..n,
            )
                .prop_map(move |(edges, start)| (graph(n, &edges), start))
        })
    }

    proptest! {
        #[test]
        fn trace_invariants_hold((graph, start) in arb_graph()) {
            let n = graph.vertex_count();
            let start = v(start);
            let trace = run_trace(&graph, start).unwrap();

            // First step pushes the start vertex, last step pops to empty.
            let first = trace.step(0).unwrap();
            prop_assert_eq!(first.action, StepAction::Push);
            prop_assert_eq!(first.node, start);
            let last = trace.final_step().unwrap();
            prop_assert_eq!(last.action, StepAction::Pop);
            prop_assert!(last.stack.is_empty());

            // Visited order is duplicate free and equals the reachable set.
            let order: Vec<VertexId> = trace.visited_order().to_vec();
            let unique: BTreeSet<VertexId> = order.iter().copied().collect();
            prop_assert_eq!(unique.len(), order.len());
            prop_assert_eq!(unique, reachable(&graph, start));

            let mut previous = vec![false; n];
            for step in trace.steps() {
                prop_assert!(step.node.index() < n);
                prop_assert_eq!(step.visited.len(), n);

                // No vertex twice on the stack, all ids in range.
                let mut on_stack = HashSet::new();
                for u in &step.stack {
                    prop_assert!(u.index() < n);
                    prop_assert!(on_stack.insert(*u));
                }

                // Visited flags never go back to false.
                for (was, now) in previous.iter().zip(&step.visited) {
                    prop_assert!(!*was || *now);
                }
                previous = step.visited.clone();
            }

            // Each vertex is pushed once and popped once at most.
            let pushes = trace.steps().iter().filter(|s| s.action == StepAction::Push).count();
            let pops = trace.steps().iter().filter(|s| s.action == StepAction::Pop).count();
            prop_assert_eq!(pushes, trace.reachable_count());
            prop_assert_eq!(pops, trace.reachable_count());
        }

        #[test]
        fn trace_is_deterministic((graph, start) in arb_graph()) {
            let a = run_trace(&graph, v(start)).unwrap();
            let b = run_trace(&graph, v(start)).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
