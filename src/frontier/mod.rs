//! This module provides the implementation of usual frontiers.
use compare::Compare;
use std::cmp::Ordering;

use crate::Scored;

/// What the best-first frontiers actually store: the entry they were given,
/// along with the identity key extracted at push time and the sequence
/// number which breaks ties between equal scores.
#[derive(Debug, Clone)]
struct Slot<K, S, N> {
    state: K,
    seq: u64,
    entry: Scored<S, N>,
}

/// Greater means better: the lowest score wins and, among equal scores, the
/// earliest push wins.
#[derive(Debug, Clone, Copy, Default)]
struct MinScore;
impl<K, S: Ord, N> Compare<Slot<K, S, N>> for MinScore {
    fn compare(&self, l: &Slot<K, S, N>, r: &Slot<K, S, N>) -> Ordering {
        r.entry
            .score
            .cmp(&l.entry.score)
            .then_with(|| r.seq.cmp(&l.seq))
    }
}

/// Renders the given items separated by a blank, the way all frontiers
/// display their contents.
fn join<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> std::fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

pub mod fifo;
pub mod lazy;
pub mod lifo;
pub mod priority;

pub use fifo::*;
pub use lazy::*;
pub use lifo::*;
pub use priority::*;
