//! Blind random filling.

use std::time::Instant;

use griddler_core::{CellState, Grid};
use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::{FailureReason, SolveOutcome, Strategy};

/// Default attempt budget, generous enough for demonstration-sized grids.
const DEFAULT_ATTEMPT_BUDGET: u64 = 1 << 25;

/// Baseline policy: fills the whole grid at random and checks the result,
/// over and over, up to an attempt budget.
///
/// Hopeless beyond a handful of cells, which is the point - it exists as a
/// baseline to compare real policies against and as an animation toy. Seed
/// it for reproducible runs.
///
/// # Examples
///
/// ```
/// use griddler_core::{Clue, ClueSet, Grid};
/// use griddler_solver::{RandomWalk, Strategy as _};
///
/// let clues = ClueSet::new(vec![Clue::new([1])], vec![Clue::new([1])])?;
/// let mut grid = Grid::new(clues);
///
/// let outcome = RandomWalk::with_seed(7).solve(&mut grid);
/// assert!(outcome.solved);
/// # Ok::<(), griddler_core::InvalidClueError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: Pcg64Mcg,
    attempt_budget: u64,
    attempts: u64,
    outcome: SolveOutcome,
    step_mode: bool,
    done: bool,
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomWalk {
    /// Creates the policy with an entropy-derived seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Creates the policy with a fixed seed for reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            attempts: 0,
            outcome: SolveOutcome::default(),
            step_mode: false,
            done: false,
        }
    }

    /// Replaces the attempt budget.
    #[must_use]
    pub fn attempt_budget(mut self, budget: u64) -> Self {
        self.attempt_budget = budget;
        self
    }

    fn fill_random(&mut self, grid: &mut Grid) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let state = if self.rng.random() {
                    CellState::Filled
                } else {
                    CellState::Excluded
                };
                grid.set(x, y, state);
            }
        }
    }

    fn attempt(&mut self, grid: &mut Grid) -> bool {
        self.fill_random(grid);
        self.attempts += 1;
        self.outcome.steps += 1;
        grid.is_solved()
    }
}

impl Strategy for RandomWalk {
    fn name(&self) -> &'static str {
        "random walk"
    }

    fn solve(&mut self, grid: &mut Grid) -> SolveOutcome {
        self.reset_statistics();
        let started = Instant::now();
        if self.step_mode {
            return self.outcome.clone();
        }

        while self.attempts < self.attempt_budget {
            if self.attempt(grid) {
                self.outcome.solved = true;
                log::debug!("random walk: hit after {} attempts", self.attempts);
                break;
            }
        }
        if !self.outcome.solved {
            self.outcome.failure = Some(FailureReason::AttemptLimit);
        }
        self.outcome.guessed_cells = grid.determined_count();
        self.outcome.completion = grid.completion();
        self.outcome.elapsed = started.elapsed();
        self.outcome.clone()
    }

    fn statistics(&self) -> &SolveOutcome {
        &self.outcome
    }

    fn reset_statistics(&mut self) {
        self.outcome = SolveOutcome::default();
        self.attempts = 0;
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
        if self.attempt(grid) {
            self.outcome.solved = true;
            self.done = true;
        } else if self.attempts >= self.attempt_budget {
            self.outcome.failure = Some(FailureReason::AttemptLimit);
            self.done = true;
        }
        self.outcome.completion = grid.completion();
        !self.done
    }

    fn has_next_step(&self) -> bool {
        self.step_mode && !self.done
    }

    fn current_step(&self) -> usize {
        self.outcome.steps
    }
}

#[cfg(test)]
mod tests {
    use griddler_core::{Clue, ClueSet};

    use super::*;

    fn single_cell_grid() -> Grid {
        let clues = ClueSet::new(vec![Clue::new([1])], vec![Clue::new([1])]).unwrap();
        Grid::new(clues)
    }

    #[test]
    fn test_solves_single_cell() {
        // One cell, one valid filling: a coin flip per attempt
        let mut grid = single_cell_grid();
        let outcome = RandomWalk::with_seed(42).attempt_budget(256).solve(&mut grid);
        assert!(outcome.solved);
        assert!(grid.is_solved());
    }

    #[test]
    fn test_attempt_budget_is_reported() {
        // Unsatisfiable clues: every attempt fails, the budget runs out
        let clues = ClueSet::new(
            vec![Clue::new([1]), Clue::new([1])],
            vec![Clue::new([2]), Clue::new([2])],
        )
        .unwrap();
        let mut grid = Grid::new(clues);
        let outcome = RandomWalk::with_seed(1).attempt_budget(64).solve(&mut grid);
        assert!(!outcome.solved);
        assert_eq!(outcome.failure, Some(FailureReason::AttemptLimit));
        assert_eq!(outcome.steps, 64);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut grid = single_cell_grid();
            RandomWalk::with_seed(seed).attempt_budget(64).solve(&mut grid)
        };
        assert_eq!(run(7).steps, run(7).steps);
    }

    #[test]
    fn test_step_mode_one_attempt_per_call() {
        let mut strategy = RandomWalk::with_seed(3).attempt_budget(8);
        strategy.set_step_mode(true);

        let mut grid = single_cell_grid();
        let mut calls = 0;
        while strategy.execute_next_step(&mut grid) {
            calls += 1;
        }
        assert!(calls < 8);
        assert!(strategy.statistics().solved || strategy.statistics().failure.is_some());
    }
}
