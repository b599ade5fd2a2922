use binary_heap_plus::BinaryHeap;
use rustc_hash::FxHashMap;
use std::fmt::{Debug, Display};

use crate::{EmptyFrontierError, Frontier, FrontierKind, PushOutcome, Score, Scored, SearchNode};

use super::{join, MinScore, Slot};

/// Below this many dead heap elements, the heap is never compacted.
const COMPACTION_THRESHOLD: usize = 64;

/// A best-first frontier which deduplicates states by lazy deletion.
///
/// This frontier offers the very same contract as the `PriorityFrontier`:
/// one entry per state, lowest score wins, ties go to the earliest push. But
/// rather than updating entries in place, a cheaper entry is simply pushed
/// on top of the heap and the copy it supersedes is left behind as a dead
/// element. Dead elements are recognized and skipped when they reach the top
/// of the heap, and the heap gets compacted when they outnumber the live
/// ones.
pub struct LazyPriorityFrontier<N: SearchNode, S: Ord = Score> {
    heap: BinaryHeap<Slot<N::State, S, N>, MinScore>,
    /// Maps every queued state onto the sequence number and score of its
    /// live element.
    live: FxHashMap<N::State, (u64, S)>,
    /// The number of dead elements still sitting in the heap.
    stale: usize,
    /// The sequence number to hand to the next pushed entry.
    seq: u64,
}

impl<N: SearchNode, S: Ord + Clone> Frontier for LazyPriorityFrontier<N, S> {
    type Entry = Scored<S, N>;

    fn push(&mut self, entry: Scored<S, N>) -> PushOutcome {
        let seq = self.seq;
        self.seq += 1;

        let state = entry.node.state().clone();
        let outcome = match self.live.get(&state) {
            None => PushOutcome::Inserted,
            Some((_, best)) if entry.score < *best => {
                self.stale += 1;
                PushOutcome::Replaced
            }
            Some(_) => PushOutcome::Discarded,
        };

        if outcome == PushOutcome::Discarded {
            tracing::trace!(target: "frontiers", op = "push", kind = %FrontierKind::LazyPriority, ?outcome, "state already queued");
            return outcome;
        }

        self.live.insert(state.clone(), (seq, entry.score.clone()));
        self.heap.push(Slot { state, seq, entry });
        self.compact_if_needed();
        outcome
    }

    fn pop(&mut self) -> Result<Scored<S, N>, EmptyFrontierError> {
        while let Some(slot) = self.heap.pop() {
            if self.is_live(&slot) {
                self.live.remove(&slot.state);
                if self.live.is_empty() {
                    // whatever remains is dead
                    self.heap.clear();
                    self.stale = 0;
                }
                return Ok(slot.entry);
            }
            self.stale -= 1;
        }

        tracing::trace!(target: "frontiers", op = "pop", kind = %FrontierKind::LazyPriority, "empty");
        Err(EmptyFrontierError {
            kind: FrontierKind::LazyPriority,
        })
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
        self.stale = 0;
    }

    fn len(&self) -> usize {
        self.live.len()
    }
}

impl<N: SearchNode, S: Ord + Clone> LazyPriorityFrontier<N, S> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::from_vec_cmp(vec![], MinScore),
            live: FxHashMap::default(),
            stale: 0,
            seq: 0,
        }
    }

    /// Returns true iff some entry for the given state is queued.
    pub fn contains(&self, state: &N::State) -> bool {
        self.live.contains_key(state)
    }

    /// Returns the score of the entry queued for the given state (if any).
    pub fn score_of(&self, state: &N::State) -> Option<&S> {
        self.live.get(state).map(|(_, score)| score)
    }

    /// The number of dead elements the heap currently holds.
    pub fn stale(&self) -> usize {
        self.stale
    }

    fn is_live(&self, slot: &Slot<N::State, S, N>) -> bool {
        matches!(self.live.get(&slot.state), Some((seq, _)) if *seq == slot.seq)
    }

    /// Rebuilds the heap out of its live elements alone, as soon as the dead
    /// ones make up more than half of it.
    fn compact_if_needed(&mut self) {
        if self.stale <= COMPACTION_THRESHOLD || self.stale <= self.live.len() {
            return;
        }

        let before = self.heap.len();
        let heap = std::mem::replace(&mut self.heap, BinaryHeap::from_vec_cmp(vec![], MinScore));
        let kept = heap
            .into_vec()
            .into_iter()
            .filter(|slot| self.is_live(slot))
            .collect::<Vec<_>>();
        self.heap = BinaryHeap::from_vec_cmp(kept, MinScore);
        self.stale = 0;

        tracing::trace!(
            target: "frontiers",
            op = "compact",
            kind = %FrontierKind::LazyPriority,
            before,
            after = self.heap.len(),
            "dropped dead heap elements"
        );
    }
}

impl<N: SearchNode, S: Ord + Clone> Default for LazyPriorityFrontier<N, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Displays the live entries as `score:node`, in pop order.
impl<N, S> Display for LazyPriorityFrontier<N, S>
where
    N: SearchNode + Display,
    S: Ord + Clone + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use compare::Compare;

        let mut slots = self
            .heap
            .iter()
            .filter(|slot| self.is_live(slot))
            .collect::<Vec<_>>();
        slots.sort_by(|a, b| MinScore.compare(b, a));
        join(f, slots.into_iter().map(|s| &s.entry))
    }
}

impl<N, S> Debug for LazyPriorityFrontier<N, S>
where
    N: SearchNode + Debug,
    S: Ord + Clone + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use compare::Compare;

        let mut slots = self
            .heap
            .iter()
            .filter(|slot| self.is_live(slot))
            .collect::<Vec<_>>();
        slots.sort_by(|a, b| MinScore.compare(b, a));
        f.debug_struct("LazyPriorityFrontier")
            .field("len", &self.live.len())
            .field("stale", &self.stale)
            .field("entries", &slots.into_iter().map(|s| &s.entry).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{node, Reference, Tagged, XorShift};
    use super::super::PriorityFrontier;
    use super::*;

    fn drain(frontier: &mut LazyPriorityFrontier<Tagged, isize>) -> Vec<(isize, Tagged)> {
        let mut out = vec![];
        while !frontier.is_empty() {
            let Scored { score, node } = frontier.pop().unwrap();
            out.push((score, node));
        }
        out
    }

    #[test]
    fn fresh_frontier_is_empty() {
        let mut frontier = LazyPriorityFrontier::<Tagged, isize>::new();
        assert!(frontier.is_empty());
        assert_eq!(
            Err(EmptyFrontierError {
                kind: FrontierKind::LazyPriority
            }),
            frontier.pop()
        );
    }

    #[test]
    fn pops_by_increasing_score() {
        let mut frontier = LazyPriorityFrontier::new();
        frontier.push(Scored::new(3, node('a', 1)));
        frontier.push(Scored::new(1, node('b', 2)));
        frontier.push(Scored::new(5, node('c', 3)));

        assert_eq!(
            vec![(1, node('b', 2)), (3, node('a', 1)), (5, node('c', 3))],
            drain(&mut frontier)
        );
    }

    #[test]
    fn keeps_the_cheapest_entry_per_state() {
        let mut frontier = LazyPriorityFrontier::new();
        assert_eq!(PushOutcome::Inserted, frontier.push(Scored::new(10, node('a', 1))));
        assert_eq!(PushOutcome::Replaced, frontier.push(Scored::new(5, node('a', 2))));
        assert_eq!(PushOutcome::Discarded, frontier.push(Scored::new(5, node('a', 3))));
        assert_eq!(PushOutcome::Discarded, frontier.push(Scored::new(8, node('a', 4))));

        assert_eq!(1, frontier.len());
        assert_eq!(1, frontier.stale());
        assert_eq!(Some(&5), frontier.score_of(&node('a', 0).id));
        assert_eq!("5:a2", frontier.to_string());
        assert_eq!(vec![(5, node('a', 2))], drain(&mut frontier));
        assert_eq!(0, frontier.stale());
    }

    #[test]
    fn dead_elements_are_never_popped() {
        let mut frontier = LazyPriorityFrontier::new();
        frontier.push(Scored::new(9, node('a', 0)));
        frontier.push(Scored::new(4, node('b', 0)));
        frontier.push(Scored::new(2, node('a', 1)));
        frontier.push(Scored::new(1, node('a', 2)));

        assert_eq!(vec![(1, node('a', 2)), (4, node('b', 0))], drain(&mut frontier));
        assert_eq!(
            Err(EmptyFrontierError {
                kind: FrontierKind::LazyPriority
            }),
            frontier.pop()
        );
    }

    #[test]
    fn compaction_drops_dead_elements() {
        let mut frontier = LazyPriorityFrontier::new();
        frontier.push(Scored::new(1_000, node('a', 0)));
        for i in 1..=(COMPACTION_THRESHOLD + 1) {
            frontier.push(Scored::new(1_000 - i as isize, node('a', i)));
        }

        assert_eq!(1, frontier.len());
        assert_eq!(0, frontier.stale());
        assert_eq!(
            vec![(1_000 - (COMPACTION_THRESHOLD as isize + 1), node('a', COMPACTION_THRESHOLD + 1))],
            drain(&mut frontier)
        );
    }

    #[test]
    fn agrees_with_the_indexed_heap() {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
        let mut lazy = LazyPriorityFrontier::new();
        let mut indexed = PriorityFrontier::new();
        let mut reference = Reference::default();

        for step in 0..5_000 {
            if rng.below(4) == 0 {
                let expected = reference.pop();
                let a = lazy.pop().ok().map(|e| (e.score, e.node));
                let b = indexed.pop().ok().map(|e| (e.score, e.node));
                assert_eq!(expected, a, "step {}", step);
                assert_eq!(expected, b, "step {}", step);
            } else {
                let id = char::from(b'a' + rng.below(8) as u8);
                let score = rng.below(100) as isize;
                reference.push(score, node(id, step));
                let x = lazy.push(Scored::new(score, node(id, step)));
                let y = indexed.push(Scored::new(score, node(id, step)));
                assert_eq!(x, y, "step {}", step);
            }
            assert_eq!(reference.len(), lazy.len());
            assert_eq!(indexed.len(), lazy.len());
        }
    }

    #[test]
    fn default_score_type_is_accepted() {
        let score = |x: f64| Score::new(x).unwrap();
        let mut frontier: LazyPriorityFrontier<Tagged> = LazyPriorityFrontier::default();
        frontier.push(Scored::new(score(1.5), node('a', 0)));
        frontier.push(Scored::new(score(0.5), node('a', 1)));

        assert_eq!(Ok(Scored::new(score(0.5), node('a', 1))), frontier.pop());
        assert!(frontier.is_empty());
    }

    #[test]
    fn matches_the_reference_over_many_seeds() {
        for seed in 1..200_u64 {
            let mut rng = XorShift(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1);
            let mut lazy = LazyPriorityFrontier::new();
            let mut indexed = PriorityFrontier::new();
            let mut reference = Reference::default();

            for step in 0..800 {
                if rng.below(3) == 0 {
                    let expected = reference.pop();
                    assert_eq!(expected, lazy.pop().ok().map(|e| (e.score, e.node)), "seed {} step {}", seed, step);
                    assert_eq!(expected, indexed.pop().ok().map(|e| (e.score, e.node)), "seed {} step {}", seed, step);
                } else {
                    let id = char::from(b'a' + rng.below(12) as u8);
                    let score = rng.below(40) as isize;
                    reference.push(score, node(id, step));
                    let x = lazy.push(Scored::new(score, node(id, step)));
                    let y = indexed.push(Scored::new(score, node(id, step)));
                    assert_eq!(x, y, "seed {} step {}", seed, step);
                }
                assert_eq!(reference.len(), lazy.len());
                assert_eq!(reference.len(), indexed.len());
            }
        }
    }

    #[test]
    fn debug_lists_live_entries_in_pop_order() {
        let mut frontier = LazyPriorityFrontier::new();
        frontier.push(Scored::new(4, node('a', 0)));
        frontier.push(Scored::new(3, node('b', 0)));
        frontier.push(Scored::new(2, node('a', 1)));

        assert_eq!(
            "LazyPriorityFrontier { len: 2, stale: 1, entries: [\
             Scored { score: 2, node: Tagged { id: 'a', tag: 1 } }, \
             Scored { score: 3, node: Tagged { id: 'b', tag: 0 } }] }",
            format!("{:?}", frontier)
        );
    }
}
