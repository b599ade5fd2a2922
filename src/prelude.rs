use std::{fmt::Display, hash::Hash, str::FromStr, sync::Arc};

use ordered_float::NotNan;

/// The stock real valued score. Building one from a NaN fails, so every
/// `Score` is comparable with every other one.
pub type Score = NotNan<f64>;

/// Anything that can be stored in a frontier which deduplicates its entries.
///
/// The frontier only ever looks at the state of a node: everything else is
/// opaque payload. The state is cloned once when the node is pushed and that
/// copy serves as the identity key for as long as the node stays queued.
pub trait SearchNode {
    type State: Eq + Hash + Clone;

    fn state(&self) -> &Self::State;
}

/// A plain search node: a state, the cost paid to reach it and the actions
/// that led there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T, A = ()> {
    pub state: Arc<T>,
    pub cost: isize,
    pub path: Vec<A>,
}
impl<T, A> Node<T, A> {
    pub fn root(state: T) -> Self {
        Node {
            state: Arc::new(state),
            cost: 0,
            path: vec![],
        }
    }
    /// Creates the node reached by applying `action` from this node.
    pub fn successor(&self, action: A, state: T, step_cost: isize) -> Self
    where
        A: Clone,
    {
        let mut path = self.path.clone();
        path.push(action);
        Node {
            state: Arc::new(state),
            cost: self.cost + step_cost,
            path,
        }
    }
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}
impl<T: Eq + Hash, A> SearchNode for Node<T, A> {
    type State = Arc<T>;

    fn state(&self) -> &Arc<T> {
        &self.state
    }
}
impl<T: Display, A> Display for Node<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.state)
    }
}

/// An entry of a best-first frontier: a node along with its evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored<S, N> {
    pub score: S,
    pub node: N,
}
impl<S, N> Scored<S, N> {
    pub fn new(score: S, node: N) -> Self {
        Scored { score, node }
    }
}
impl<S, N> From<(S, N)> for Scored<S, N> {
    fn from((score, node): (S, N)) -> Self {
        Scored { score, node }
    }
}
impl<S: Display, N: Display> Display for Scored<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.score, self.node)
    }
}

/// Tells what a frontier did with the entry it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushOutcome {
    /// The entry was added: the frontier holds one more item.
    Inserted,
    /// The entry took the place of a worse entry for the same state.
    Replaced,
    /// The entry was dropped because the frontier already knew its state
    /// (at the same or a better score).
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontierKind {
    Priority,
    LazyPriority,
    Fifo,
    Lifo,
}
impl FromStr for FrontierKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(Self::Priority),
            "lazy" => Ok(Self::LazyPriority),
            "fifo" => Ok(Self::Fifo),
            "lifo" => Ok(Self::Lifo),
            _ => Err("The only supported frontier types are 'priority', 'lazy', 'fifo' and 'lifo'"),
        }
    }
}
impl Display for FrontierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Priority => "priority",
            Self::LazyPriority => "lazy",
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
        })
    }
}

/// Raised when `pop` is called on a frontier which holds no entry. Drivers
/// are expected to check `is_empty` first, so this is a contract violation
/// on their side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot pop from an empty {kind} frontier")]
pub struct EmptyFrontierError {
    pub kind: FrontierKind,
}

pub trait Frontier {
    type Entry;

    /// This is how you push an entry onto the frontier.
    fn push(&mut self, entry: Self::Entry) -> PushOutcome;
    /// This method yields the next entry to expand, according to the policy
    /// of the frontier.
    fn pop(&mut self) -> Result<Self::Entry, EmptyFrontierError>;
    /// This method clears the frontier: it removes all entries from it.
    fn clear(&mut self);
    /// Yields the number of entries that can still be popped.
    fn len(&self) -> usize;
    /// Returns true iff the frontier is empty (len == 0)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
