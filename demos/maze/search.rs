//! The search loops driving the frontiers through the maze.

use frontiers::{Frontier, Node, Score, Scored};
use rustc_hash::FxHashSet;

use crate::model::{Cell, Maze, Move};

pub type MazeNode = Node<Cell, Move>;

/// What came out of a search.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// The cost of the path to the goal, if one was found.
    pub cost: Option<isize>,
    /// The number of nodes that have been expanded.
    pub expanded: usize,
    /// The largest number of entries the frontier held at once.
    pub max_frontier: usize,
}

/// Best-first search ordered by `g + weight * h`. With a weight of 1, this
/// is plain A* and the returned path is optimal.
pub fn astar<F>(maze: &Maze, weight: f64, frontier: &mut F) -> anyhow::Result<Outcome>
where
    F: Frontier<Entry = Scored<Score, MazeNode>>,
{
    let score = |node: &MazeNode| -> anyhow::Result<Score> {
        let h = maze.manhattan(*node.state) as f64;
        Ok(Score::new(node.cost as f64 + weight * h)?)
    };

    let mut closed = FxHashSet::default();
    let mut outcome = Outcome::default();

    let root = MazeNode::root(maze.start());
    frontier.push(Scored::new(score(&root)?, root));

    while !frontier.is_empty() {
        let Scored { node, .. } = frontier.pop()?;
        if !closed.insert(*node.state) {
            continue;
        }
        outcome.expanded += 1;

        if *node.state == maze.goal() {
            outcome.cost = Some(node.cost);
            break;
        }

        let mut successors = vec![];
        maze.for_each_neighbour(*node.state, |mv, next| {
            if !closed.contains(&next) {
                successors.push(node.successor(mv, next, 1));
            }
        });
        for next in successors {
            frontier.push(Scored::new(score(&next)?, next));
        }
        outcome.max_frontier = outcome.max_frontier.max(frontier.len());
    }

    tracing::debug!(
        target: "maze",
        op = "astar",
        weight,
        cost = ?outcome.cost,
        expanded = outcome.expanded,
        max_frontier = outcome.max_frontier,
        "search completed"
    );
    Ok(outcome)
}

/// Uninformed search: breadth-first when given a FIFO frontier, depth-first
/// when given a LIFO one.
pub fn uninformed<F>(maze: &Maze, frontier: &mut F) -> anyhow::Result<Outcome>
where
    F: Frontier<Entry = MazeNode>,
{
    let mut closed = FxHashSet::default();
    let mut outcome = Outcome::default();

    frontier.push(MazeNode::root(maze.start()));

    while !frontier.is_empty() {
        let node = frontier.pop()?;
        if !closed.insert(*node.state) {
            continue;
        }
        outcome.expanded += 1;

        if *node.state == maze.goal() {
            outcome.cost = Some(node.cost);
            break;
        }

        maze.for_each_neighbour(*node.state, |mv, next| {
            if !closed.contains(&next) {
                frontier.push(node.successor(mv, next, 1));
            }
        });
        outcome.max_frontier = outcome.max_frontier.max(frontier.len());
    }

    tracing::debug!(
        target: "maze",
        op = "uninformed",
        cost = ?outcome.cost,
        expanded = outcome.expanded,
        max_frontier = outcome.max_frontier,
        "search completed"
    );
    Ok(outcome)
}
