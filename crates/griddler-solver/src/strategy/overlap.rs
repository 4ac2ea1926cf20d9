//! Block-overlap deduction.

use std::time::Instant;

use griddler_core::{CellState, Grid, Line};

use crate::{FailureReason, SolveOutcome, Strategy};

/// Overlap-technique policy: fills the cells common to every placement of a
/// block without enumerating placements one by one.
///
/// For each block the leftmost and rightmost legal positions are computed
/// from the clue alone; the cells covered by both are filled in every
/// placement, so they can be committed outright. When the clue packs its
/// line exactly, cells no placement reaches are excluded the same way.
///
/// The technique reads only the clue, never the current partial state, which
/// makes it cheaper but strictly weaker than
/// [`LinePropagation`](crate::LinePropagation). Puzzles it cannot finish end
/// with [`FailureReason::Stalled`].
///
/// # Examples
///
/// ```
/// use griddler_core::{Clue, ClueSet, Grid};
/// use griddler_solver::{Overlap, Strategy as _};
///
/// // 1 + gap + 1 packs a line of three; overlap alone solves the grid.
/// let clues = ClueSet::new(
///     vec![Clue::new([1, 1]), Clue::new([]), Clue::new([1, 1])],
///     vec![Clue::new([1, 1]), Clue::new([]), Clue::new([1, 1])],
/// )?;
/// let mut grid = Grid::new(clues);
///
/// let outcome = Overlap::new().solve(&mut grid);
/// assert!(outcome.solved);
/// # Ok::<(), griddler_core::InvalidClueError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Overlap {
    outcome: SolveOutcome,
    step_mode: bool,
    done: bool,
}

impl Overlap {
    /// Creates the policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one deduction pass over every row, then every column.
    ///
    /// Returns the number of cells committed.
    fn pass(grid: &mut Grid) -> usize {
        Line::all(grid.width(), grid.height())
            .map(|line| deduce_line(grid, line))
            .sum()
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

impl Strategy for Overlap {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn solve(&mut self, grid: &mut Grid) -> SolveOutcome {
        self.reset_statistics();
        let started = Instant::now();
        if self.step_mode {
            return self.outcome.clone();
        }

        loop {
            let committed = Self::pass(grid);
            self.outcome.steps += 1;
            self.outcome.deduced_cells += committed;
            if committed == 0 || grid.is_solved() {
                break;
            }
        }
        self.finish(grid, started);
        log::debug!(
            "overlap: solved={} deduced={} passes={}",
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

        let committed = Self::pass(grid);
        self.outcome.steps += 1;
        self.outcome.deduced_cells += committed;
        self.outcome.completion = grid.completion();

        if grid.is_solved() {
            self.outcome.solved = true;
            self.done = true;
            return false;
        }
        if committed == 0 {
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

/// Commits every cell of one line the overlap technique can decide.
///
/// Only undetermined cells are written; a cell determined elsewhere is never
/// overwritten.
fn deduce_line(grid: &mut Grid, line: Line) -> usize {
    let clue = grid.clues().clue(line).clone();
    let cells = grid.line_cells(line);
    let len = cells.len();
    let mut committed = 0;

    if clue.is_empty() {
        for (i, &cell) in cells.iter().enumerate() {
            if cell == CellState::Undetermined {
                grid.set_line_cell(line, i, CellState::Excluded);
                committed += 1;
            }
        }
        return committed;
    }

    let blocks = clue.blocks();
    let last = blocks.len() - 1;

    // Start of each block in the leftmost and the rightmost packing.
    let mut earliest = vec![0; blocks.len()];
    for i in 1..blocks.len() {
        earliest[i] = earliest[i - 1] + blocks[i - 1] as usize + 1;
    }
    let mut latest = vec![0; blocks.len()];
    latest[last] = len - blocks[last] as usize;
    for i in (0..last).rev() {
        latest[i] = latest[i + 1] - blocks[i] as usize - 1;
    }

    // A cell covered in both extreme placements is covered in all of them
    for (i, &block) in blocks.iter().enumerate() {
        for pos in latest[i]..earliest[i] + block as usize {
            if cells[pos] == CellState::Undetermined {
                grid.set_line_cell(line, pos, CellState::Filled);
                committed += 1;
            }
        }
    }

    // A packed clue leaves no slack: cells outside every placement window
    // can only be gaps.
    if clue.min_line_len() == len {
        let mut reachable = vec![false; len];
        for (i, &block) in blocks.iter().enumerate() {
            for start in earliest[i]..=latest[i] {
                for cell in &mut reachable[start..start + block as usize] {
                    *cell = true;
                }
            }
        }
        for (pos, &cell) in cells.iter().enumerate() {
            if !reachable[pos] && cell == CellState::Undetermined {
                grid.set_line_cell(line, pos, CellState::Excluded);
                committed += 1;
            }
        }
    }

    committed
}
