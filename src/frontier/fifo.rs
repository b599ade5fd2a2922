use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::fmt::Display;

use crate::{EmptyFrontierError, Frontier, FrontierKind, PushOutcome, SearchNode};

use super::join;

/// A first-in first-out frontier, as used by breadth-first search.
///
/// A state which is already queued is never queued a second time: pushing
/// it again leaves the queue untouched, and in particular does not alter the
/// position of the copy that was queued first. Once that copy has been
/// popped, the state may be queued again.
///
/// # Example
/// ```
/// # use frontiers::{FifoFrontier, Frontier, Node};
/// let mut frontier = FifoFrontier::new();
///
/// for state in ['a', 'b', 'a', 'c'] {
///     frontier.push(Node::<_, ()>::root(state));
/// }
///
/// assert_eq!(3, frontier.len());
/// assert_eq!('a', *frontier.pop().unwrap().state);
/// assert_eq!('b', *frontier.pop().unwrap().state);
/// assert_eq!('c', *frontier.pop().unwrap().state);
/// ```
pub struct FifoFrontier<N: SearchNode> {
    /// The queued nodes, oldest first.
    queue: VecDeque<N>,
    /// The states of the queued nodes.
    states: FxHashSet<N::State>,
}

impl<N: SearchNode> Frontier for FifoFrontier<N> {
    type Entry = N;

    fn push(&mut self, node: N) -> PushOutcome {
        if !self.states.insert(node.state().clone()) {
            tracing::trace!(target: "frontiers", op = "push", kind = %FrontierKind::Fifo, "state already queued");
            return PushOutcome::Discarded;
        }
        self.queue.push_back(node);
        PushOutcome::Inserted
    }

    fn pop(&mut self) -> Result<N, EmptyFrontierError> {
        match self.queue.pop_front() {
            Some(node) => {
                self.states.remove(node.state());
                Ok(node)
            }
            None => {
                tracing::trace!(target: "frontiers", op = "pop", kind = %FrontierKind::Fifo, "empty");
                Err(EmptyFrontierError {
                    kind: FrontierKind::Fifo,
                })
            }
        }
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.states.clear();
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<N: SearchNode> FifoFrontier<N> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            states: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns true iff a node for the given state is queued.
    pub fn contains(&self, state: &N::State) -> bool {
        self.states.contains(state)
    }
}

impl<N: SearchNode> Default for FifoFrontier<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Displays the queued nodes from the oldest to the most recent one.
impl<N: SearchNode + Display> Display for FifoFrontier<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        join(f, &self.queue)
    }
}
