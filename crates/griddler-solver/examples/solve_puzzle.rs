//! Example demonstrating the solving policies on a nonogram.
//!
//! This example shows how to:
//! - Build a `ClueSet` from command-line clue lists or a built-in pattern
//! - Pick a solving policy
//! - Display the solved grid and the run statistics
//!
//! # Usage
//!
//! Solve a built-in puzzle:
//!
//! ```sh
//! cargo run --example solve_puzzle
//! cargo run --example solve_puzzle -- --puzzle cross
//! ```
//!
//! Solve explicit clues (one comma-separated clue per line, lines separated
//! by slashes):
//!
//! ```sh
//! cargo run --example solve_puzzle -- --rows "1/3/5/3/1" --cols "1/3/5/3/1"
//! ```
//!
//! Pick a policy and watch its phases with logging:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example solve_puzzle -- --strategy propagation
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use griddler_core::{Clue, ClueSet, Grid, SolutionGrid};
use griddler_solver::{Backtracking, LinePropagation, Overlap, RandomWalk, Strategy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyKind {
    Overlap,
    Propagation,
    Backtracking,
    Random,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Puzzle {
    Diamond,
    Cross,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Solving policy to run.
    #[arg(long, value_name = "KIND", default_value = "backtracking")]
    strategy: StrategyKind,

    /// Built-in puzzle to solve.
    #[arg(long, value_name = "NAME", default_value = "diamond")]
    puzzle: Puzzle,

    /// Row clues, e.g. "1/3/5/3/1" or "2,1/3/0".
    #[arg(long, value_name = "CLUES", requires = "cols")]
    rows: Option<String>,

    /// Column clues, same format as --rows.
    #[arg(long, value_name = "CLUES", requires = "rows")]
    cols: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let clues = match (&args.rows, &args.cols) {
        (Some(rows), Some(cols)) => match build_clues(rows, cols) {
            Ok(clues) => clues,
            Err(message) => {
                eprintln!("{message}");
                process::exit(2);
            }
        },
        _ => builtin_clues(args.puzzle),
    };

    let mut strategy: Box<dyn Strategy> = match args.strategy {
        StrategyKind::Overlap => Box::new(Overlap::new()),
        StrategyKind::Propagation => Box::new(LinePropagation::new()),
        StrategyKind::Backtracking => Box::new(Backtracking::new()),
        StrategyKind::Random => Box::new(RandomWalk::new()),
    };

    println!("Puzzle ({}x{}):", clues.width(), clues.height());
    for (y, clue) in clues.rows().iter().enumerate() {
        println!("  row {y}: {clue}");
    }
    for (x, clue) in clues.columns().iter().enumerate() {
        println!("  column {x}: {clue}");
    }
    println!();

    let mut grid = Grid::new(clues);
    let outcome = strategy.solve(&mut grid);

    println!("Grid after {}:", strategy.name());
    println!("{grid}");
    println!();
    println!("{outcome}");

    if !outcome.solved {
        process::exit(1);
    }
}

fn builtin_clues(puzzle: Puzzle) -> ClueSet {
    let pattern = match puzzle {
        Puzzle::Diamond => "
            ..#..
            .###.
            #####
            .###.
            ..#..
        ",
        Puzzle::Cross => "
            ..#..
            ..#..
            #####
            ..#..
            ..#..
        ",
    };
    let solution: SolutionGrid = pattern.parse().expect("built-in pattern is well formed");
    ClueSet::from_solution(&solution)
}

fn build_clues(rows: &str, cols: &str) -> Result<ClueSet, String> {
    let rows = parse_clue_list(rows).map_err(|e| format!("--rows: {e}"))?;
    let cols = parse_clue_list(cols).map_err(|e| format!("--cols: {e}"))?;
    ClueSet::new(rows, cols).map_err(|e| e.to_string())
}

fn parse_clue_list(text: &str) -> Result<Vec<Clue>, String> {
    text.split('/')
        .map(|chunk| {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                return Ok(Clue::new([]));
            }
            chunk
                .split(',')
                .map(|block| {
                    block
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| format!("bad block length {block:?}"))
                })
                .collect::<Result<Clue, _>>()
        })
        .collect()
}
