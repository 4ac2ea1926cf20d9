//! Nonogram solving strategies.
//!
//! The entry point is the [`Strategy`] trait and its interchangeable
//! policies:
//!
//! - [`Overlap`]: the cheap block-overlap technique; commits only cells
//!   every placement of a block covers.
//! - [`LinePropagation`]: sound line-by-line deduction to a fixed point;
//!   never guesses, so it stalls on puzzles that need case splits.
//! - [`Backtracking`]: deduction plus a most-constrained-cell backtracking
//!   search, bounded by explicit [`SearchLimits`].
//! - [`RandomWalk`]: blind random filling under an attempt budget; useful as
//!   a baseline and for demonstrations, not as a practical solver.
//!
//! Every strategy mutates the [`Grid`](griddler_core::Grid) it is given in
//! place and reports a [`SolveOutcome`] with run statistics and, on failure,
//! the specific [`FailureReason`].
//!
//! # Examples
//!
//! ```
//! use griddler_core::{ClueSet, Grid, SolutionGrid};
//! use griddler_solver::{Backtracking, Strategy as _};
//!
//! let solution: SolutionGrid = "
//!     ..#..
//!     .###.
//!     ######
//!     .###.
//!     ..#..
//! "
//! .parse()?;
//! let mut grid = Grid::new(ClueSet::from_solution(&solution));
//!
//! let outcome = Backtracking::new().solve(&mut grid);
//! assert!(outcome.solved);
//! assert_eq!(grid.to_string(), solution.to_string());
//! # Ok::<(), griddler_core::ParseSolutionError>(())
//! ```

pub use self::{
    limits::SearchLimits,
    outcome::{FailureReason, SolveOutcome},
    propagator::{Contradiction, PropagationReport},
    strategy::{
        Backtracking, BoxedStrategy, LinePropagation, Overlap, RandomWalk, Strategy,
        all_strategies,
    },
};

mod limits;
mod outcome;
pub mod propagator;
pub mod strategy;

#[cfg(test)]
mod testing;
