//! Traversal traces and replay.
//!
//! A [`Trace`] is the complete, ordered record of one depth-first run: every
//! PUSH, VISIT and POP with a snapshot of the stack and visited flags taken
//! right after the action. Snapshots are owned values, so nothing that
//! happens to the engine after a step is recorded can change it.
//!
//! A [`TraceCursor`] navigates a finished trace the way the viewer does:
//! step forward, step backward, jump to a step, or auto-play to the end.

use crate::graph::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Delay between auto-played steps in the viewer.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(700);

/// Kind of action recorded by a [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepAction {
    /// A vertex was pushed onto the stack.
    Push,
    /// The vertex on top of the stack was marked visited.
    Visit,
    /// A vertex with no remaining candidates was popped.
    Pop,
}

impl StepAction {
    /// Wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepAction::Push => "PUSH",
            StepAction::Visit => "VISIT",
            StepAction::Pop => "POP",
        }
    }
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded action with its post-action snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    /// What happened.
    pub action: StepAction,
    /// The vertex the action applies to.
    pub node: VertexId,
    /// Stack contents after the action, top of stack first.
    pub stack: Vec<VertexId>,
    /// Visited flag per vertex after the action, indexed by vertex id.
    pub visited: Vec<bool>,
}

/// The full record of one traversal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    start: VertexId,
    steps: Vec<Step>,
    visited_order: Vec<VertexId>,
}

impl Trace {
    pub(crate) fn new(start: VertexId) -> Self {
        Self {
            start,
            steps: Vec::new(),
            visited_order: Vec::new(),
        }
    }

    pub(crate) fn record_step(&mut self, step: Step) {
        if step.action == StepAction::Visit {
            self.visited_order.push(step.node);
        }
        self.steps.push(step);
    }

    /// The vertex the traversal started from.
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// All steps in traversal order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the step at `index`, if any.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no step was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Vertices in first-visit order (the DFS order).
    pub fn visited_order(&self) -> &[VertexId] {
        &self.visited_order
    }

    /// Number of vertices reached from the start vertex.
    pub fn reachable_count(&self) -> usize {
        self.visited_order.len()
    }

    /// The last recorded step.
    pub fn final_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Opens a replay cursor positioned on the first step.
    pub fn cursor(&self) -> TraceCursor<'_> {
        TraceCursor {
            trace: self,
            position: 0,
        }
    }
}

/// Replay position over a [`Trace`].
///
/// Positions are clamped to `[0, len - 1]`; moving past either end leaves
/// the cursor where it is.
#[derive(Debug, Clone, Copy)]
pub struct TraceCursor<'a> {
    trace: &'a Trace,
    position: usize,
}

impl<'a> TraceCursor<'a> {
    /// Index of the current step.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The step under the cursor.
    pub fn current(&self) -> Option<&'a Step> {
        self.trace.step(self.position)
    }

    /// Returns `true` when the cursor is on the last step.
    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.trace.len()
    }

    /// Moves to `index`, clamped to the valid range, and returns the step.
    pub fn seek(&mut self, index: usize) -> Option<&'a Step> {
        self.position = index.min(self.trace.len().saturating_sub(1));
        self.current()
    }

    /// Advances one step. Returns `None` if already on the last step.
    pub fn step_forward(&mut self) -> Option<&'a Step> {
        if self.is_at_end() {
            return None;
        }
        self.position += 1;
        self.current()
    }

    /// Goes back one step. Returns `None` if already on the first step.
    pub fn step_backward(&mut self) -> Option<&'a Step> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.current()
    }

    /// Returns to the first step.
    pub fn rewind(&mut self) -> Option<&'a Step> {
        self.seek(0)
    }

    /// Plays the remaining steps in order, leaving the cursor on the last one.
    pub fn autoplay(&mut self) -> Autoplay<'_, 'a> {
        Autoplay { cursor: self }
    }
}

/// Iterator returned by [`TraceCursor::autoplay`].
#[derive(Debug)]
pub struct Autoplay<'c, 'a> {
    cursor: &'c mut TraceCursor<'a>,
}

impl<'c, 'a> Iterator for Autoplay<'c, 'a> {
    type Item = &'a Step;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.step_forward()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .cursor
            .trace
            .len()
            .saturating_sub(self.cursor.position + 1);
        (remaining, Some(remaining))
    }
}
