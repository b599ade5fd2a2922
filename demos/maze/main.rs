use std::time::Instant;

use frontiers::{FifoFrontier, FrontierKind, LazyPriorityFrontier, LifoFrontier, PriorityFrontier};
use model::Maze;
use peak_alloc::PeakAlloc;
use search::{astar, uninformed, Outcome};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

mod model;
mod search;

#[global_allocator]
static PEAK_ALLOC: PeakAlloc = PeakAlloc;

#[derive(Debug, StructOpt)]
pub enum Args {
    Solve {
        #[structopt(short, long, default_value = "100")]
        width: usize,
        #[structopt(short = "H", long, default_value = "100")]
        height: usize,
        /// The fraction of cells that are walls
        #[structopt(short, long, default_value = "0.2")]
        density: f64,
        #[structopt(short, long, default_value = "7")]
        seed: u64,
        #[structopt(short, long, default_value = "priority")]
        frontier: FrontierKind,
        /// The weight of the heuristic (best-first frontiers only)
        #[structopt(short = "W", long, default_value = "1.0")]
        weight: f64,
    },
    PrintHeader,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Args::from_args() {
        Args::Solve {
            width,
            height,
            density,
            seed,
            frontier,
            weight,
        } => {
            anyhow::ensure!(width > 0 && height > 0, "the maze must have at least one cell");
            anyhow::ensure!(weight >= 0.0, "the heuristic weight must be a non negative number");

            let maze = Maze::generate(width, height, density, seed);
            let name = format!("maze-{}x{}-{}", width, height, seed);
            run_resolution_xp(&name, &maze, frontier, weight)
        }
        Args::PrintHeader => {
            resolution_header();
            Ok(())
        }
    }
}

fn run_resolution_xp(name: &str, maze: &Maze, kind: FrontierKind, weight: f64) -> anyhow::Result<()> {
    let start = Instant::now();
    let outcome: Outcome = match kind {
        FrontierKind::Priority => astar(maze, weight, &mut PriorityFrontier::new())?,
        FrontierKind::LazyPriority => astar(maze, weight, &mut LazyPriorityFrontier::new())?,
        FrontierKind::Fifo => uninformed(maze, &mut FifoFrontier::new())?,
        FrontierKind::Lifo => uninformed(maze, &mut LifoFrontier::new())?,
    };
    let duration = start.elapsed();

    let status = if outcome.cost.is_some() { "Found" } else { "Unreachable" };
    let cost = outcome
        .cost
        .map(|v| v.to_string())
        .unwrap_or_else(|| "not found".to_owned());

    println!(
        "{:>30} | {:>10} | {:>12} | {:>8.2} | {:>8.2} | {:>10} | {:>10} | {:>10}",
        name,
        kind,
        status,
        duration.as_secs_f32(),
        PEAK_ALLOC.peak_usage_as_mb(),
        cost,
        outcome.expanded,
        outcome.max_frontier,
    );
    Ok(())
}

fn resolution_header() {
    println!(
        "{:>30} | {:>10} | {:>12} | {:>8} | {:>8} | {:>10} | {:>10} | {:>10}",
        "NAME", "FRONTIER", "STATUS", "DURATION", "RAM_(MB)", "COST", "EXPANDED", "MAX_OPEN"
    );
}
