//! Deduction plus most-constrained-cell search.

use std::{collections::VecDeque, time::Instant};

use griddler_core::{CellState, Grid, Line, possibility};

use crate::{FailureReason, SearchLimits, SolveOutcome, Strategy, propagator};

/// The full solving policy: propagation to a fixed point, then a bounded
/// backtracking search over the remaining undetermined cells.
///
/// Branching picks the cell whose row and column admit the fewest fillings
/// and whose filled-fraction is furthest from an even split, so wrong
/// guesses fail fast. Budgets come from [`SearchLimits`]; breaching one ends
/// the solve with the matching [`FailureReason`] instead of looping.
///
/// # Examples
///
/// ```
/// use griddler_core::{ClueSet, Grid, SolutionGrid};
/// use griddler_solver::{Backtracking, Strategy as _};
///
/// let solution: SolutionGrid = "#.\n.#".parse()?;
/// let mut grid = Grid::new(ClueSet::from_solution(&solution));
///
/// let outcome = Backtracking::new().solve(&mut grid);
/// assert!(outcome.solved);
/// # Ok::<(), griddler_core::ParseSolutionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Backtracking {
    limits: SearchLimits,
    outcome: SolveOutcome,
    step_mode: bool,
    step_queue: VecDeque<CellChange>,
    step_prepared: bool,
}

/// One planned cell mutation of a stepwise replay.
#[derive(Debug, Clone, Copy)]
struct CellChange {
    x: usize,
    y: usize,
    state: CellState,
}

/// Result of one search node.
enum SearchResult {
    Solved,
    Backtrack,
    Limit(FailureReason),
}

/// A branching candidate picked by the selection heuristic.
struct BranchChoice {
    x: usize,
    y: usize,
    bias: f64,
    score: f64,
}

/// Possibility-set summary of one line: how many fillings it admits and how
/// often each cell is filled among them.
struct LineStats {
    fillings: usize,
    filled_per_cell: Vec<usize>,
}

impl Default for Backtracking {
    fn default() -> Self {
        Self::new()
    }
}

impl Backtracking {
    /// Creates the policy with [`SearchLimits::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(SearchLimits::default())
    }

    /// Creates the policy with explicit budgets.
    #[must_use]
    pub fn with_limits(limits: SearchLimits) -> Self {
        Self {
            limits,
            outcome: SolveOutcome::default(),
            step_mode: false,
            step_queue: VecDeque::new(),
            step_prepared: false,
        }
    }

    /// The configured budgets.
    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    fn search(
        &mut self,
        grid: &mut Grid,
        started: Instant,
        depth: usize,
        ceiling: usize,
    ) -> SearchResult {
        self.outcome.steps += 1;

        if started.elapsed() > self.limits.max_time {
            return SearchResult::Limit(FailureReason::Timeout);
        }
        if self.outcome.backtracks > self.limits.max_backtracks {
            return SearchResult::Limit(FailureReason::BacktrackLimit);
        }
        if depth > ceiling {
            return SearchResult::Limit(FailureReason::DepthLimit);
        }

        if grid.is_solved() {
            return SearchResult::Solved;
        }
        if grid.find_contradiction().is_some() {
            self.outcome.backtracks += 1;
            return SearchResult::Backtrack;
        }

        // Cheap wins before guessing
        if propagator::propagate(grid).is_err() {
            self.outcome.backtracks += 1;
            return SearchResult::Backtrack;
        }
        if grid.is_solved() {
            return SearchResult::Solved;
        }

        let Some(choice) = select_branch_cell(grid) else {
            self.outcome.backtracks += 1;
            return SearchResult::Backtrack;
        };
        let first = if choice.bias > 0.5 {
            CellState::Filled
        } else {
            CellState::Excluded
        };
        let second = match first {
            CellState::Filled => CellState::Excluded,
            _ => CellState::Filled,
        };
        log::trace!(
            "branch at ({}, {}): bias {:.2}, score {:.2}",
            choice.x,
            choice.y,
            choice.bias,
            choice.score
        );

        let snapshot = grid.snapshot();
        grid.set(choice.x, choice.y, first);
        match self.search(grid, started, depth + 1, ceiling) {
            SearchResult::Backtrack => {}
            up => return up,
        }
        self.outcome.backtracks += 1;
        grid.restore(&snapshot);

        grid.set(choice.x, choice.y, second);
        match self.search(grid, started, depth + 1, ceiling) {
            SearchResult::Backtrack => {}
            up => return up,
        }
        self.outcome.backtracks += 1;
        grid.restore(&snapshot);
        SearchResult::Backtrack
    }
}

impl Strategy for Backtracking {
    fn name(&self) -> &'static str {
        "backtracking"
    }

    fn solve(&mut self, grid: &mut Grid) -> SolveOutcome {
        self.reset_statistics();
        let started = Instant::now();
        if self.step_mode {
            return self.outcome.clone();
        }

        let initially_determined = grid.determined_count();
        let deduction = propagator::propagate(grid);
        match deduction {
            Ok(report) => {
                self.outcome.steps += report.sweeps;
                self.outcome.deduced_cells = grid.determined_count() - initially_determined;
                log::debug!(
                    "deduction phase: {} cells in {} sweeps",
                    self.outcome.deduced_cells,
                    report.sweeps
                );

                let result = if grid.is_solved() {
                    SearchResult::Solved
                } else {
                    log::debug!("search phase");
                    let ceiling = self.limits.depth_ceiling(grid);
                    self.search(grid, started, 0, ceiling)
                };
                match result {
                    SearchResult::Solved => self.outcome.solved = true,
                    SearchResult::Backtrack => {
                        self.outcome.failure = Some(FailureReason::Exhausted);
                    }
                    SearchResult::Limit(reason) => self.outcome.failure = Some(reason),
                }
            }
            Err(contradiction) => {
                log::debug!("{contradiction}");
                self.outcome.failure = Some(FailureReason::Contradiction);
            }
        }

        self.outcome.guessed_cells = grid
            .determined_count()
            .saturating_sub(initially_determined + self.outcome.deduced_cells);
        self.outcome.completion = grid.completion();
        self.outcome.elapsed = started.elapsed();
        log::debug!(
            "backtracking: solved={} backtracks={} elapsed={:?}",
            self.outcome.solved,
            self.outcome.backtracks,
            self.outcome.elapsed
        );
        self.outcome.clone()
    }

    fn statistics(&self) -> &SolveOutcome {
        &self.outcome
    }

    fn reset_statistics(&mut self) {
        self.outcome = SolveOutcome::default();
        self.step_queue.clear();
        self.step_prepared = false;
    }

    fn set_step_mode(&mut self, enabled: bool) {
        self.step_mode = enabled;
        self.reset_statistics();
    }

    fn execute_next_step(&mut self, grid: &mut Grid) -> bool {
        if !self.step_mode {
            return false;
        }

        if !self.step_prepared {
            self.step_prepared = true;
            // Solve a private copy, then replay the differences one cell at
            // a time against the live grid.
            let mut scratch = grid.clone();
            let mut solver = Self::with_limits(self.limits);
            let outcome = solver.solve(&mut scratch);
            self.outcome.backtracks = outcome.backtracks;
            self.outcome.deduced_cells = outcome.deduced_cells;
            self.outcome.failure = outcome.failure;
            for y in 0..grid.height() {
                for x in 0..grid.width() {
                    let state = scratch.cell(x, y);
                    if grid.cell(x, y) != state {
                        self.step_queue.push_back(CellChange { x, y, state });
                    }
                }
            }
        }

        let Some(change) = self.step_queue.pop_front() else {
            return false;
        };
        grid.set(change.x, change.y, change.state);
        self.outcome.steps += 1;
        self.outcome.completion = grid.completion();
        if grid.is_solved() {
            self.outcome.solved = true;
        }
        !self.step_queue.is_empty()
    }

    fn has_next_step(&self) -> bool {
        self.step_mode && (!self.step_prepared || !self.step_queue.is_empty())
    }

    fn current_step(&self) -> usize {
        self.outcome.steps
    }
}

/// Scores every undetermined cell and returns the most constrained,
/// most confident one; earlier cells in scan order win ties.
///
/// Returns `None` when no undetermined cell has a non-empty row and column
/// possibility set.
fn select_branch_cell(grid: &Grid) -> Option<BranchChoice> {
    let row_stats: Vec<_> = (0..grid.height())
        .map(|y| line_stats(grid, Line::Row { y }))
        .collect();
    let column_stats: Vec<_> = (0..grid.width())
        .map(|x| line_stats(grid, Line::Column { x }))
        .collect();

    let mut best: Option<BranchChoice> = None;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.cell(x, y).is_determined() {
                continue;
            }
            let (Some(row), Some(column)) = (&row_stats[y], &column_stats[x]) else {
                continue;
            };
            let bias = cell_bias(row, x).min(cell_bias(column, y));
            let certainty = (bias - 0.5).abs();
            let score = mean_fillings(row, column) * (1.0 - certainty);
            if best.as_ref().is_none_or(|current| score < current.score) {
                best = Some(BranchChoice { x, y, bias, score });
            }
        }
    }
    best
}

fn line_stats(grid: &Grid, line: Line) -> Option<LineStats> {
    let cells = grid.line_cells(line);
    let fillings = possibility::possible_lines(grid.clues().clue(line), &cells);
    if fillings.is_empty() {
        return None;
    }
    let filled_per_cell = (0..cells.len())
        .map(|i| {
            fillings
                .iter()
                .filter(|filling| filling[i] == CellState::Filled)
                .count()
        })
        .collect();
    Some(LineStats {
        fillings: fillings.len(),
        filled_per_cell,
    })
}

#[expect(clippy::cast_precision_loss)]
fn cell_bias(stats: &LineStats, i: usize) -> f64 {
    stats.filled_per_cell[i] as f64 / stats.fillings as f64
}

#[expect(clippy::cast_precision_loss)]
fn mean_fillings(row: &LineStats, column: &LineStats) -> f64 {
    (row.fillings + column.fillings) as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use griddler_core::{ClueSet, Line, SolutionGrid, runs};

    use super::*;
    use crate::testing;

    fn assert_all_lines_satisfied(grid: &Grid) {
        for line in Line::all(grid.width(), grid.height()) {
            assert!(
                runs::satisfies(&grid.line_cells(line), grid.clues().clue(line)),
                "{line} does not match its clue"
            );
        }
    }

    #[test]
    fn test_solves_deduction_only_puzzle_without_guessing() {
        let mut grid = testing::diamond_grid();
        let outcome = Backtracking::new().solve(&mut grid);
        assert!(outcome.solved);
        assert_eq!(outcome.backtracks, 0);
        assert_eq!(outcome.guessed_cells, 0);
        assert_eq!(grid.to_string(), testing::diamond_solution().to_string());
    }

    #[test]
    fn test_solves_cross_exactly() {
        let mut grid = testing::cross_grid();
        let outcome = Backtracking::new().solve(&mut grid);
        assert!(outcome.solved);
        assert_eq!(grid.to_string(), testing::cross_solution().to_string());
    }

    #[test]
    fn test_search_solves_ambiguous_puzzle() {
        // Every line [1]: deduction forces nothing, search must place one
        // filled cell per row and column
        let mut grid = Grid::new(testing::permutation_clues(5));
        let outcome = Backtracking::new().solve(&mut grid);
        assert!(outcome.solved);
        assert!(outcome.guessed_cells > 0);
        assert_all_lines_satisfied(&grid);
    }

    #[test]
    fn test_backtrack_budget_is_honored() {
        // The target pins the search to the one permutation it tries last:
        // the heuristic prefers excluding early cells, so the main diagonal
        // is reached only after a wall of backtracking.
        let clues = testing::permutation_clues(5);
        let target: SolutionGrid = "
            #....
            .#...
            ..#..
            ...#.
            ....#
        "
        .parse()
        .unwrap();
        let mut grid = Grid::with_target(clues, target).unwrap();
        let limits = SearchLimits {
            max_backtracks: 5,
            ..SearchLimits::default()
        };
        let outcome = Backtracking::with_limits(limits).solve(&mut grid);
        assert!(!outcome.solved);
        assert_eq!(outcome.failure, Some(FailureReason::BacktrackLimit));
    }

    #[test]
    fn test_search_exhausts_when_no_target_assignment_exists() {
        // The all-blank target is unreachable: every clue-consistent grid
        // has filled cells, so the search tries everything and gives up.
        let clues = testing::permutation_clues(3);
        let target = SolutionGrid::from_rows(vec![vec![false; 3]; 3]).unwrap();
        let mut grid = Grid::with_target(clues, target).unwrap();
        let outcome = Backtracking::new().solve(&mut grid);
        assert!(!outcome.solved);
        assert_eq!(outcome.failure, Some(FailureReason::Exhausted));
    }

    #[test]
    fn test_timeout_is_reported() {
        let clues = testing::permutation_clues(5);
        let target: SolutionGrid = "
            #....
            .#...
            ..#..
            ...#.
            ....#
        "
        .parse()
        .unwrap();
        let mut grid = Grid::with_target(clues, target).unwrap();
        let limits = SearchLimits {
            max_time: Duration::ZERO,
            ..SearchLimits::default()
        };
        let outcome = Backtracking::with_limits(limits).solve(&mut grid);
        assert!(!outcome.solved);
        assert_eq!(outcome.failure, Some(FailureReason::Timeout));
    }

    #[test]
    fn test_contradictory_clues_fail_without_search() {
        let clues = ClueSet::new(
            vec![griddler_core::Clue::new([1]), griddler_core::Clue::new([1])],
            vec![griddler_core::Clue::new([1]), griddler_core::Clue::new([])],
        )
        .unwrap();
        let mut grid = Grid::new(clues);
        let outcome = Backtracking::new().solve(&mut grid);
        assert!(!outcome.solved);
        assert_eq!(outcome.failure, Some(FailureReason::Contradiction));
        assert_eq!(outcome.backtracks, 0);
    }

    #[test]
    fn test_step_mode_replays_to_solution() {
        let mut strategy = Backtracking::new();
        strategy.set_step_mode(true);

        let mut grid = testing::diamond_grid();
        assert!(strategy.has_next_step());
        while strategy.execute_next_step(&mut grid) {}
        assert!(grid.is_solved());
        assert!(strategy.statistics().solved);
        assert!(!strategy.has_next_step());
        assert_eq!(strategy.current_step(), 25);
    }

    #[test]
    fn test_solve_in_step_mode_defers_to_steps() {
        let mut strategy = Backtracking::new();
        strategy.set_step_mode(true);
        let mut grid = testing::diamond_grid();
        let outcome = strategy.solve(&mut grid);
        assert!(!outcome.solved);
        assert_eq!(grid.determined_count(), 0);
    }

    #[test]
    fn test_statistics_survive_until_reset() {
        let mut strategy = Backtracking::new();
        let mut grid = testing::diamond_grid();
        strategy.solve(&mut grid);
        assert!(strategy.statistics().solved);
        strategy.reset_statistics();
        assert!(!strategy.statistics().solved);
    }
}
