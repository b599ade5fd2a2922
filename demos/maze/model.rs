//! This module contains the definition of the grid maze the demo searches
//! through. Mazes are generated from a seed, so any run can be reproduced.

use std::fmt::Display;

use bitset_fixed::BitSet;

/// A position in the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}
impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// A rectangular 4-connected grid. Each step costs 1.
#[derive(Debug, Clone)]
pub struct Maze {
    pub width: usize,
    pub height: usize,
    /// One bit per cell, set iff the cell is a wall.
    walls: BitSet,
}
impl Maze {
    /// Generates a `width` x `height` maze where roughly `density` of the
    /// cells are walls. The top left (start) and bottom right (goal) corners
    /// are always open.
    pub fn generate(width: usize, height: usize, density: f64, seed: u64) -> Self {
        let mut walls = BitSet::new(width * height);
        // xorshift never leaves 0
        let mut rng = seed.max(1);
        for i in 0..(width * height) {
            rng ^= rng << 13;
            rng ^= rng >> 7;
            rng ^= rng << 17;
            let draw = (rng >> 11) as f64 / (1_u64 << 53) as f64;
            walls.set(i, draw < density);
        }
        let mut maze = Maze {
            width,
            height,
            walls,
        };
        let (start, goal) = (maze.index(maze.start()), maze.index(maze.goal()));
        maze.walls.set(start, false);
        maze.walls.set(goal, false);
        maze
    }

    pub fn start(&self) -> Cell {
        Cell { x: 0, y: 0 }
    }
    pub fn goal(&self) -> Cell {
        Cell {
            x: self.width.saturating_sub(1),
            y: self.height.saturating_sub(1),
        }
    }
    pub fn is_open(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height && !self.walls[self.index(cell)]
    }

    /// Calls `f` with every open cell reachable in one move from `cell`.
    pub fn for_each_neighbour<F>(&self, cell: Cell, mut f: F)
    where
        F: FnMut(Move, Cell),
    {
        let Cell { x, y } = cell;
        let candidates = [
            (Move::Up, y.checked_sub(1).map(|y| Cell { x, y })),
            (Move::Down, Some(Cell { x, y: y + 1 })),
            (Move::Left, x.checked_sub(1).map(|x| Cell { x, y })),
            (Move::Right, Some(Cell { x: x + 1, y })),
        ];
        for (mv, next) in candidates {
            if let Some(next) = next.filter(|c| self.is_open(*c)) {
                f(mv, next);
            }
        }
    }

    /// Admissible estimate of the remaining distance to the goal.
    pub fn manhattan(&self, cell: Cell) -> isize {
        let goal = self.goal();
        (goal.x.abs_diff(cell.x) + goal.y.abs_diff(cell.y)) as isize
    }

    fn index(&self, cell: Cell) -> usize {
        cell.y * self.width + cell.x
    }
}
