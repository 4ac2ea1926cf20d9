//! Pure deduction.

use std::time::Instant;

use griddler_core::Grid;

use crate::{FailureReason, SolveOutcome, Strategy, propagator};

/// Deduction-only policy: propagates every line to a fixed point and stops.
///
/// Sound and fast, but incomplete; puzzles that need case-split reasoning
/// end with [`FailureReason::Stalled`].
///
/// # Examples
///
/// ```
/// use griddler_core::{ClueSet, Grid, SolutionGrid};
/// use griddler_solver::{LinePropagation, Strategy as _};
///
/// let solution: SolutionGrid = "###\n###\n###".parse()?;
/// let mut grid = Grid::new(ClueSet::from_solution(&solution));
///
/// let outcome = LinePropagation::new().solve(&mut grid);
/// assert!(outcome.solved);
/// assert_eq!(outcome.backtracks, 0);
/// # Ok::<(), griddler_core::ParseSolutionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinePropagation {
    outcome: SolveOutcome,
    step_mode: bool,
    cursor: usize,
    idle_lines: usize,
    done: bool,
}

impl LinePropagation {
    /// Creates the policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn finish(&mut self, grid: &Grid, started: Instant) {
        self.outcome.solved = grid.is_solved();
        self.outcome.completion = grid.completion();
        self.outcome.elapsed = started.elapsed();
        if !self.outcome.solved && self.outcome.failure.is_none() {
            self.outcome.failure = Some(FailureReason::Stalled);
        }
    }
}

impl Strategy for LinePropagation {
    fn name(&self) -> &'static str {
        "line propagation"
    }

    fn solve(&mut self, grid: &mut Grid) -> SolveOutcome {
        self.reset_statistics();
        let started = Instant::now();
        if self.step_mode {
            return self.outcome.clone();
        }

        match propagator::propagate(grid) {
            Ok(report) => {
                self.outcome.steps = report.sweeps;
                self.outcome.deduced_cells = report.committed;
            }
            Err(contradiction) => {
                log::debug!("{contradiction}");
                self.outcome.failure = Some(FailureReason::Contradiction);
            }
        }
        self.finish(grid, started);
        log::debug!(
            "line propagation: solved={} deduced={} sweeps={}",
            self.outcome.solved,
            self.outcome.deduced_cells,
            self.outcome.steps
        );
        self.outcome.clone()
    }

    fn statistics(&self) -> &SolveOutcome {
        &self.outcome
    }

    fn reset_statistics(&mut self) {
        self.outcome = SolveOutcome::default();
        self.cursor = 0;
        self.idle_lines = 0;
        self.done = false;
    }

    fn set_step_mode(&mut self, enabled: bool) {
        self.step_mode = enabled;
        self.reset_statistics();
    }

    fn execute_next_step(&mut self, grid: &mut Grid) -> bool {
        if !self.step_mode || self.done {
            return false;
        }

        let lines: Vec<_> =
            griddler_core::Line::all(grid.width(), grid.height()).collect();
        let line = lines[self.cursor % lines.len()];
        self.cursor = (self.cursor + 1) % lines.len();
        self.outcome.steps += 1;

        match propagator::deduce_line(grid, line) {
            Ok(committed) => {
                self.outcome.deduced_cells += committed;
                if committed == 0 {
                    self.idle_lines += 1;
                } else {
                    self.idle_lines = 0;
                }
            }
            Err(_) => {
                self.outcome.failure = Some(FailureReason::Contradiction);
                self.done = true;
                return false;
            }
        }

        self.outcome.completion = grid.completion();
        if grid.is_solved() {
            self.outcome.solved = true;
            self.done = true;
            return false;
        }
        // A full barren cycle over all lines means the fixed point is reached
        if self.idle_lines >= lines.len() {
            self.outcome.failure = Some(FailureReason::Stalled);
            self.done = true;
            return false;
        }
        true
    }

    fn has_next_step(&self) -> bool {
        self.step_mode && !self.done
    }

    fn current_step(&self) -> usize {
        self.outcome.steps
    }
}
