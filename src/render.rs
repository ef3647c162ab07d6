//! Plain-text rendering of graphs and traces.
//!
//! This is the legacy `/dfs?start=<v>` output, kept for clients that never
//! moved to the JSON payload.

use crate::graph::{Graph, VertexId};
use crate::trace::{StepAction, Trace};
use std::fmt::Write;

fn list(ids: &[VertexId]) -> String {
    let items: Vec<String> = ids.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// One `v: [neighbors]` line per vertex, under a header.
pub fn adjacency_text(graph: &Graph) -> String {
    let mut out = String::from("Adjacency list (undirected graph):\n");
    for (v, neighbors) in graph.adjacency() {
        let _ = writeln!(out, "{v}: {}", list(neighbors));
    }
    out
}

/// Human-readable transcript of a trace.
///
/// PUSH and POP lines close one iteration of the traversal loop and are
/// followed by a blank line.
pub fn trace_transcript(trace: &Trace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Starting DFS from vertex {}", trace.start());
    let _ = writeln!(out, "Initial stack: {}", list(&[trace.start()]));
    out.push('\n');

    for step in trace.steps().iter().skip(1) {
        match step.action {
            StepAction::Visit => {
                let _ = writeln!(out, "VISIT {} (marked visited)", step.node);
            }
            StepAction::Push => {
                // The vertex below the new top is the one it was discovered from.
                let parent = step.stack.get(1).copied().unwrap_or(trace.start());
                let _ = writeln!(
                    out,
                    "PUSH {} (neighbor of {parent}). Stack: {}",
                    step.node,
                    list(&step.stack)
                );
                out.push('\n');
            }
            StepAction::Pop => {
                let _ = writeln!(
                    out,
                    "POP {} (no unvisited neighbor left). Stack: {}",
                    step.node,
                    list(&step.stack)
                );
                out.push('\n');
            }
        }
    }

    let order: Vec<String> = trace.visited_order().iter().map(ToString::to_string).collect();
    let _ = writeln!(out, "DFS complete. Visited order: {}", order.join(", "));
    out
}

/// Adjacency listing followed by the transcript, as served over HTTP.
pub fn legacy_report(graph: &Graph, trace: &Trace) -> String {
    format!("{}\n{}\n", adjacency_text(graph), trace_transcript(trace))
}
