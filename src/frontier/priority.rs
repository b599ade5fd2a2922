use compare::Compare;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::cmp::Ordering::{Greater, Less};
use std::collections::hash_map::Entry::{Occupied, Vacant};
use std::fmt::{Debug, Display};

use crate::{EmptyFrontierError, Frontier, FrontierKind, PushOutcome, Score, Scored, SearchNode};

use self::Action::{BubbleDown, BubbleUp, DoNothing};

use super::{join, MinScore, Slot};

/// This is a type-safe identifier for some entry in the queue.
/// Basically, this NodeId equates to the position of the identified
/// entry in the `nodes` list from the `PriorityFrontier`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct NodeId(usize);

/// An enum to know what needs to be done with a given node id
#[derive(Debug, Copy, Clone)]
enum Action {
    DoNothing,
    BubbleUp(NodeId),
    BubbleDown(NodeId),
}

/// This is an updatable binary heap backed by a vector which ensures that
/// entries pop in increasing score order while guaranteeing that a given
/// state is only ever present *ONCE* in the priority queue (the entry with
/// the lowest score for that state is the only kept copy).
///
/// Lowering the score of a queued state is a genuine decrease-key: the
/// entry is overwritten in place and sifted up, so no stale copy of it can
/// ever be popped.
///
/// # Example
/// ```
/// # use frontiers::{Frontier, Node, PriorityFrontier, Scored};
/// let mut frontier = PriorityFrontier::new();
///
/// frontier.push(Scored::new(10, Node::<_, ()>::root('a')));
/// frontier.push(Scored::new(3, Node::root('b')));
/// frontier.push(Scored::new(5, Node::root('a'))); // cheaper path to 'a'
///
/// assert_eq!(2, frontier.len());
/// assert_eq!(3, frontier.pop().unwrap().score);
/// assert_eq!(5, frontier.pop().unwrap().score);
/// assert!(frontier.is_empty());
/// ```
pub struct PriorityFrontier<N: SearchNode, S = Score> {
    /// This is the comparator used to order the entries in the binary heap
    cmp: MinScore,
    /// A mapping that associates some state to a node identifier.
    states: FxHashMap<N::State, NodeId>,
    /// The actual payload ordered in the list. It is kept dense: popping an
    /// entry moves the last one into the freed position.
    nodes: Vec<Slot<N::State, S, N>>,
    /// The position of the items in the heap
    pos: Vec<usize>,
    /// This is the actual heap which orders entries.
    heap: Vec<NodeId>,
    /// The sequence number to hand to the next pushed entry.
    seq: u64,
}

impl<N: SearchNode, S: Ord> Frontier for PriorityFrontier<N, S> {
    type Entry = Scored<S, N>;

    /// Pushes one entry onto the heap while ensuring that only one copy of
    /// the state is kept in the heap.
    ///
    /// # Note:
    /// In the event where the heap already contains an entry `x` for the
    /// same state as the one being pushed, the cheapest of both is kept. When
    /// the new entry is strictly cheaper, it replaces `x` and its priority is
    /// increased accordingly. Otherwise, the push has no effect at all.
    fn push(&mut self, entry: Scored<S, N>) -> PushOutcome {
        let seq = self.seq;
        self.seq += 1;

        let (outcome, action) = match self.states.entry(entry.node.state().clone()) {
            Occupied(e) => {
                let id = *e.get();
                let slot = &mut self.nodes[id.0];

                if entry.score < slot.entry.score {
                    slot.seq = seq;
                    slot.entry = entry;
                    (PushOutcome::Replaced, BubbleUp(id))
                } else {
                    (PushOutcome::Discarded, DoNothing)
                }
            }
            Vacant(e) => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(Slot {
                    state: e.key().clone(),
                    seq,
                    entry,
                });
                self.heap.push(id);
                self.pos.push(self.heap.len() - 1);
                e.insert(id);
                (PushOutcome::Inserted, BubbleUp(id))
            }
        };

        if outcome != PushOutcome::Inserted {
            tracing::trace!(
                target: "frontiers",
                op = "push",
                kind = %FrontierKind::Priority,
                ?outcome,
                len = self.heap.len(),
                "state already queued"
            );
        }

        // restore the invariants
        self.process_action(action);
        outcome
    }

    /// Pops the best entry out of the heap. Here, the best is defined as the
    /// entry having the lowest score, pushed the earliest.
    fn pop(&mut self) -> Result<Scored<S, N>, EmptyFrontierError> {
        if self.heap.is_empty() {
            tracing::trace!(target: "frontiers", op = "pop", kind = %FrontierKind::Priority, "empty");
            return Err(EmptyFrontierError {
                kind: FrontierKind::Priority,
            });
        }

        let id = self.heap.swap_remove(0);
        let action = if self.heap.is_empty() {
            DoNothing
        } else {
            self.pos[self.heap[0].0] = 0;
            BubbleDown(self.heap[0])
        };
        self.process_action(action);

        let slot = self.nodes.swap_remove(id.0);
        self.pos.swap_remove(id.0);
        self.states.remove(&slot.state);

        // the former last slot now lives at `id`: point its references there
        if let Some(moved) = self.nodes.get(id.0) {
            self.heap[self.pos[id.0]] = id;
            if let Some(x) = self.states.get_mut(&moved.state) {
                *x = id;
            }
        }

        Ok(slot.entry)
    }

    /// Clears the content of the heap to reset it to a state equivalent to
    /// a fresh instantiation of the heap.
    fn clear(&mut self) {
        self.states.clear();
        self.nodes.clear();
        self.pos.clear();
        self.heap.clear();
    }

    /// Returns the 'length' of the heap. That is, the number of entries that
    /// can still be popped out of the heap.
    fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<N: SearchNode, S: Ord> PriorityFrontier<N, S> {
    /// Creates a new empty frontier.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty frontier with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cmp: MinScore,
            states: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            nodes: Vec::with_capacity(capacity),
            pos: Vec::with_capacity(capacity),
            heap: Vec::with_capacity(capacity),
            seq: 0,
        }
    }

    /// Returns true iff some entry for the given state is queued.
    pub fn contains(&self, state: &N::State) -> bool {
        self.states.contains_key(state)
    }

    /// Returns the score of the entry queued for the given state (if any).
    pub fn score_of(&self, state: &N::State) -> Option<&S> {
        self.states
            .get(state)
            .map(|id| &self.nodes[id.0].entry.score)
    }

    /// Returns the entry that would be popped next, without removing it.
    pub fn peek(&self) -> Option<&Scored<S, N>> {
        self.heap.first().map(|id| &self.nodes[id.0].entry)
    }

    /// Internal helper method to bubble a node up or down, depending of the
    /// specified action.
    fn process_action(&mut self, action: Action) {
        match action {
            BubbleUp(id) => self.bubble_up(id),
            BubbleDown(id) => self.bubble_down(id),
            DoNothing => {}
        }
    }
    /// Internal helper method to compare the entries identified by the ids
    /// found at the given positions in the heap.
    fn compare_at_pos(&self, x: usize, y: usize) -> Ordering {
        let node_x = &self.nodes[self.heap[x].0];
        let node_y = &self.nodes[self.heap[y].0];
        self.cmp.compare(node_x, node_y)
    }
    /// Internal helper method to swap the entries found at the given
    /// positions in the heap, keeping `pos` in sync.
    fn swap(&mut self, x: usize, y: usize) {
        self.heap.swap(x, y);
        self.pos[self.heap[x].0] = x;
        self.pos[self.heap[y].0] = y;
    }
    /// Internal method to bubble a node up and restore the heap invariant.
    fn bubble_up(&mut self, id: NodeId) {
        let mut me = self.pos[id.0];

        while me > 0 {
            let parent = (me - 1) / 2;
            if self.compare_at_pos(me, parent) != Greater {
                break;
            }
            self.swap(me, parent);
            me = parent;
        }
    }
    /// Internal method to sink a node down so as to restore the heap invariant.
    fn bubble_down(&mut self, id: NodeId) {
        let mut me = self.pos[id.0];

        while let Some(kid) = self.max_child_of(me) {
            if self.compare_at_pos(me, kid) != Less {
                break;
            }
            self.swap(me, kid);
            me = kid;
        }
    }
    /// Internal helper method that returns the position of the child of the
    /// node at position `pos` which is considered to be the best of the
    /// children of that node. None when the node is a leaf.
    fn max_child_of(&self, pos: usize) -> Option<usize> {
        let size = self.heap.len();
        let left = pos * 2 + 1;
        let right = pos * 2 + 2;

        if left >= size {
            return None;
        }
        if right >= size {
            return Some(left);
        }

        match self.compare_at_pos(left, right) {
            Greater => Some(left),
            _ => Some(right),
        }
    }
}

impl<N: SearchNode, S: Ord> Default for PriorityFrontier<N, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Displays the queued entries as `score:node`, in pop order.
impl<N, S> Display for PriorityFrontier<N, S>
where
    N: SearchNode + Display,
    S: Ord + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut slots = self.nodes.iter().collect::<Vec<_>>();
        slots.sort_by(|a, b| self.cmp.compare(b, a));
        join(f, slots.into_iter().map(|s| &s.entry))
    }
}

impl<N, S> Debug for PriorityFrontier<N, S>
where
    N: SearchNode + Debug,
    S: Ord + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut slots = self.nodes.iter().collect::<Vec<_>>();
        slots.sort_by(|a, b| self.cmp.compare(b, a));
        f.debug_struct("PriorityFrontier")
            .field("len", &self.heap.len())
            .field("entries", &slots.into_iter().map(|s| &s.entry).collect::<Vec<_>>())
            .finish()
    }
}
