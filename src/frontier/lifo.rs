use std::fmt::Display;

use crate::{EmptyFrontierError, Frontier, FrontierKind, PushOutcome};

use super::join;

/// A last-in first-out frontier, as used by depth-first search.
///
/// This one does not deduplicate anything: the same state may be pushed
/// (and hence popped) any number of times. Since it never looks at the
/// nodes it stores, it accepts any type of node.
#[derive(Debug, Clone)]
pub struct LifoFrontier<N> {
    stack: Vec<N>,
}

impl<N> Frontier for LifoFrontier<N> {
    type Entry = N;

    fn push(&mut self, node: N) -> PushOutcome {
        self.stack.push(node);
        PushOutcome::Inserted
    }

    fn pop(&mut self) -> Result<N, EmptyFrontierError> {
        self.stack.pop().ok_or_else(|| {
            tracing::trace!(target: "frontiers", op = "pop", kind = %FrontierKind::Lifo, "empty");
            EmptyFrontierError {
                kind: FrontierKind::Lifo,
            }
        })
    }

    fn clear(&mut self) {
        self.stack.clear()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

impl<N> LifoFrontier<N> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
        }
    }

    /// The node that would be popped next.
    pub fn peek(&self) -> Option<&N> {
        self.stack.last()
    }
}

impl<N> Default for LifoFrontier<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Displays the stacked nodes in pop order (the top of the stack first).
impl<N: Display> Display for LifoFrontier<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        join(f, self.stack.iter().rev())
    }
}
