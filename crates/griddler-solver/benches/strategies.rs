//! Benchmarks for the solving policies.
//!
//! Measures full solves of small fixed puzzles, so numbers track the cost of
//! line enumeration and (for the search-requiring case) branching overhead.
//!
//! # Benchmarks
//!
//! - **`propagation`**: deduction-only solve of a 5x5 puzzle that needs no
//!   guessing.
//! - **`backtracking_forced`**: the full policy on the same puzzle; the
//!   search phase never runs, so the difference to `propagation` is pure
//!   bookkeeping.
//! - **`backtracking_search`**: the full policy on a 5x5 with every clue
//!   `[1]`, which deduction cannot touch at all.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench strategies
//! ```

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use griddler_core::{Clue, ClueSet, Grid, SolutionGrid};
use griddler_solver::{Backtracking, LinePropagation, Strategy as _};

const DIAMOND: &str = "
    ..#..
    .###.
    #####
    .###.
    ..#..
";

fn diamond_grid() -> Grid {
    let solution: SolutionGrid = DIAMOND.parse().unwrap();
    Grid::new(ClueSet::from_solution(&solution))
}

fn permutation_grid() -> Grid {
    let single = Clue::new([1]);
    let clues = ClueSet::new(vec![single.clone(); 5], vec![single; 5]).unwrap();
    Grid::new(clues)
}

fn bench_propagation(c: &mut Criterion) {
    c.bench_function("propagation", |b| {
        b.iter_batched(
            diamond_grid,
            |mut grid| {
                let outcome = LinePropagation::new().solve(&mut grid);
                assert!(outcome.solved);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_backtracking_forced(c: &mut Criterion) {
    c.bench_function("backtracking_forced", |b| {
        b.iter_batched(
            diamond_grid,
            |mut grid| {
                let outcome = Backtracking::new().solve(&mut grid);
                assert!(outcome.solved);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_backtracking_search(c: &mut Criterion) {
    c.bench_function("backtracking_search", |b| {
        b.iter_batched(
            permutation_grid,
            |mut grid| {
                let outcome = Backtracking::new().solve(&mut grid);
                assert!(outcome.solved);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_propagation,
    bench_backtracking_forced,
    bench_backtracking_search
);
criterion_main!(benches);
