//! Search loops driving the frontiers over a small explicit graph.

use std::collections::HashSet;

use frontiers::{
    FifoFrontier, Frontier, LazyPriorityFrontier, LifoFrontier, Node, PriorityFrontier,
    PushOutcome, Scored,
};

type GraphNode = Node<&'static str, &'static str>;

/// s --1--> a --1--> b --1--> g
/// s --4--> b        a --5--> g
const EDGES: &[(&str, &str, isize)] = &[
    ("s", "a", 1),
    ("s", "b", 4),
    ("a", "b", 1),
    ("a", "g", 5),
    ("b", "g", 1),
    ("b", "s", 2),
];

fn successors(state: &str) -> impl Iterator<Item = (&'static str, isize)> + '_ {
    EDGES
        .iter()
        .filter(move |(from, _, _)| *from == state)
        .map(|(_, to, cost)| (*to, *cost))
}

/// Uniform cost search. Returns the goal node along with the outcome of
/// every push.
fn best_first<F>(frontier: &mut F) -> anyhow::Result<(Option<GraphNode>, Vec<PushOutcome>)>
where
    F: Frontier<Entry = Scored<isize, GraphNode>>,
{
    let mut pushes = vec![];
    let mut closed = HashSet::new();
    pushes.push(frontier.push(Scored::new(0, Node::root("s"))));

    while !frontier.is_empty() {
        let Scored { score, node } = frontier.pop()?;
        assert_eq!(score, node.cost);
        if !closed.insert(*node.state) {
            continue;
        }
        if *node.state == "g" {
            return Ok((Some(node), pushes));
        }
        for (next, cost) in successors(*node.state) {
            if !closed.contains(next) {
                let child = node.successor(next, next, cost);
                pushes.push(frontier.push(Scored::new(child.cost, child)));
            }
        }
    }
    Ok((None, pushes))
}

/// Breadth or depth first search, depending on the frontier.
fn uninformed<F>(frontier: &mut F) -> anyhow::Result<(Option<GraphNode>, Vec<&'static str>)>
where
    F: Frontier<Entry = GraphNode>,
{
    let mut expanded = vec![];
    let mut closed = HashSet::new();
    frontier.push(Node::root("s"));

    while !frontier.is_empty() {
        let node = frontier.pop()?;
        if !closed.insert(*node.state) {
            continue;
        }
        expanded.push(*node.state);
        if *node.state == "g" {
            return Ok((Some(node), expanded));
        }
        for (next, cost) in successors(*node.state) {
            if !closed.contains(next) {
                frontier.push(node.successor(next, next, cost));
            }
        }
    }
    Ok((None, expanded))
}

#[test]
fn uniform_cost_search_finds_the_cheapest_path() -> anyhow::Result<()> {
    let (goal, pushes) = best_first(&mut PriorityFrontier::new())?;
    let goal = goal.expect("the goal is reachable");

    assert_eq!(3, goal.cost);
    assert_eq!(vec!["a", "b", "g"], goal.path);
    // b is first reached at cost 4, then at cost 2 through a
    assert!(pushes.contains(&PushOutcome::Replaced));
    Ok(())
}

#[test]
fn both_priority_strategies_agree() -> anyhow::Result<()> {
    let (indexed, indexed_pushes) = best_first(&mut PriorityFrontier::new())?;
    let (lazy, lazy_pushes) = best_first(&mut LazyPriorityFrontier::new())?;

    assert_eq!(indexed, lazy);
    assert_eq!(indexed_pushes, lazy_pushes);
    Ok(())
}

#[test]
fn breadth_first_search_finds_the_shallowest_path() -> anyhow::Result<()> {
    let (goal, expanded) = uninformed(&mut FifoFrontier::new())?;
    let goal = goal.expect("the goal is reachable");

    assert_eq!(vec!["a", "g"], goal.path);
    assert_eq!(6, goal.cost);
    assert_eq!(vec!["s", "a", "b", "g"], expanded);
    Ok(())
}

#[test]
fn depth_first_search_dives_into_the_latest_successor() -> anyhow::Result<()> {
    let (goal, expanded) = uninformed(&mut LifoFrontier::new())?;
    let goal = goal.expect("the goal is reachable");

    assert_eq!(vec!["b", "g"], goal.path);
    assert_eq!(vec!["s", "b", "g"], expanded);
    Ok(())
}

#[test]
fn popping_an_exhausted_frontier_is_reported() {
    let mut frontier = FifoFrontier::<GraphNode>::new();
    frontier.push(Node::root("s"));
    frontier.pop().unwrap();

    let err = anyhow::Error::from(frontier.pop().unwrap_err());
    assert_eq!("cannot pop from an empty fifo frontier", err.to_string());
}

#[test]
fn diagnostic_dumps() {
    let mut priority = PriorityFrontier::new();
    priority.push(Scored::new(4, GraphNode::root("b")));
    priority.push(Scored::new(1, GraphNode::root("a")));
    assert_eq!("1:a 4:b", priority.to_string());

    let mut lifo = LifoFrontier::new();
    lifo.push(GraphNode::root("s"));
    lifo.push(GraphNode::root("s"));
    assert_eq!("s s", lifo.to_string());
}
