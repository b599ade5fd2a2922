//! Frontiers for the generic graph search procedures (best-first/A*,
//! breadth-first and depth-first search) over an observable state space.
//!
//! A frontier holds the search nodes that are yet to be expanded and decides
//! in which order they get explored. The search loop owns a frontier and
//! repeatedly pops the next node from it, pushing the successors of that node
//! back, until it reaches a goal or the frontier gets empty.

pub mod prelude;

pub mod frontier;

pub use frontier::*;
pub use prelude::*;
