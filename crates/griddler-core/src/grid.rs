//! The mutable puzzle grid.

use std::fmt::{self, Display};

use crate::{CellState, ClueSet, InvalidClueError, Line, SolutionGrid, runs};

/// A puzzle grid: the cell matrix, its clues, and an optional known target.
///
/// Dimensions come from the clue set, so they always match the clue counts.
/// The grid is mutated in place by whichever strategy is solving it; a solve
/// owns the grid exclusively for its duration (enforced by `&mut` access).
/// Speculative mutation must be bracketed by [`snapshot`](Self::snapshot) and
/// [`restore`](Self::restore).
///
/// # Examples
///
/// ```
/// use griddler_core::{CellState, Clue, ClueSet, Grid};
///
/// let clues = ClueSet::new(vec![Clue::new([2])], vec![Clue::new([1]), Clue::new([1])])?;
/// let mut grid = Grid::new(clues);
///
/// assert_eq!(grid.cell(0, 0), CellState::Undetermined);
/// grid.set(0, 0, CellState::Filled);
/// grid.set(1, 0, CellState::Filled);
/// assert!(grid.is_solved());
/// # Ok::<(), griddler_core::InvalidClueError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    clues: ClueSet,
    cells: Box<[CellState]>,
    target: Option<SolutionGrid>,
}

/// A full copy of a grid's cells, taken before a speculative assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    cells: Box<[CellState]>,
}

impl Grid {
    /// Creates an all-undetermined grid for a clue set.
    #[must_use]
    pub fn new(clues: ClueSet) -> Self {
        let cells = vec![CellState::Undetermined; clues.width() * clues.height()];
        Self {
            clues,
            cells: cells.into_boxed_slice(),
            target: None,
        }
    }

    /// Creates a grid with a known target used to short-circuit solved-checks.
    ///
    /// The target is only consulted by [`is_solved`](Self::is_solved); it
    /// never influences deduction or search.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidClueError::TargetSize`] when the target dimensions
    /// disagree with the clue counts.
    pub fn with_target(clues: ClueSet, target: SolutionGrid) -> Result<Self, InvalidClueError> {
        if target.width() != clues.width() || target.height() != clues.height() {
            return Err(InvalidClueError::TargetSize {
                expected_width: clues.width(),
                expected_height: clues.height(),
                actual_width: target.width(),
                actual_height: target.height(),
            });
        }
        let mut grid = Self::new(clues);
        grid.target = Some(target);
        Ok(grid)
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.clues.width()
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.clues.height()
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// The clue set the grid was built from.
    #[inline]
    #[must_use]
    pub fn clues(&self) -> &ClueSet {
        &self.clues
    }

    /// The known target, if one was supplied.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<&SolutionGrid> {
        self.target.as_ref()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width() + x
    }

    /// The state of the cell at `(x, y)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<CellState> {
        (x < self.width() && y < self.height()).then(|| self.cells[self.index(x, y)])
    }

    /// The state of the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of range.
    #[inline]
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> CellState {
        assert!(
            x < self.width() && y < self.height(),
            "position ({x}, {y}) out of range"
        );
        self.cells[self.index(x, y)]
    }

    /// Sets the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of range.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        assert!(
            x < self.width() && y < self.height(),
            "position ({x}, {y}) out of range"
        );
        let index = self.index(x, y);
        self.cells[index] = state;
    }

    /// Length of a line: the width for rows, the height for columns.
    #[inline]
    #[must_use]
    pub fn line_len(&self, line: Line) -> usize {
        self.clues.line_len(line)
    }

    /// Copies a line's cells into a fresh buffer, in line order.
    ///
    /// # Panics
    ///
    /// Panics if the line is out of range.
    #[must_use]
    pub fn line_cells(&self, line: Line) -> Vec<CellState> {
        match line {
            Line::Row { y } => (0..self.width()).map(|x| self.cell(x, y)).collect(),
            Line::Column { x } => (0..self.height()).map(|y| self.cell(x, y)).collect(),
        }
    }

    /// Sets the `i`-th cell of a line.
    ///
    /// # Panics
    ///
    /// Panics if the line or the position within it is out of range.
    pub fn set_line_cell(&mut self, line: Line, i: usize, state: CellState) {
        match line {
            Line::Row { y } => self.set(i, y, state),
            Line::Column { x } => self.set(x, i, state),
        }
    }

    /// Number of cells that are no longer undetermined.
    #[must_use]
    pub fn determined_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_determined()).count()
    }

    /// Fraction of cells determined, in `0.0..=1.0`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn completion(&self) -> f64 {
        if self.cells.is_empty() {
            return 1.0;
        }
        self.determined_count() as f64 / self.cells.len() as f64
    }

    /// Whether the grid is solved.
    ///
    /// With a target, compares the filled pattern against the target mask
    /// (undetermined counts as not filled). Without one, requires every cell
    /// to be determined and every line's runs to equal its clue.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        if let Some(target) = &self.target {
            return (0..self.height()).all(|y| {
                (0..self.width())
                    .all(|x| target.is_filled(x, y) == (self.cell(x, y) == CellState::Filled))
            });
        }
        self.cells.iter().all(|cell| cell.is_determined())
            && Line::all(self.width(), self.height())
                .all(|line| runs::satisfies(&self.line_cells(line), self.clues.clue(line)))
    }

    /// Finds a line whose current assignment can no longer satisfy its clue.
    ///
    /// Returns the first such line in row-then-column order, or `None` when
    /// every line is still completable.
    #[must_use]
    pub fn find_contradiction(&self) -> Option<Line> {
        Line::all(self.width(), self.height())
            .find(|&line| runs::in_contradiction(&self.line_cells(line), self.clues.clue(line)))
    }

    /// Takes a full copy of the cells for later [`restore`](Self::restore).
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells.clone(),
        }
    }

    /// Restores the cells from a snapshot of this grid.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot was taken from a grid of a different size.
    pub fn restore(&mut self, snapshot: &GridSnapshot) {
        assert_eq!(
            self.cells.len(),
            snapshot.cells.len(),
            "snapshot size mismatch"
        );
        self.cells.copy_from_slice(&snapshot.cells);
    }

    /// Resets every cell to undetermined.
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Undetermined);
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width() {
                write!(f, "{}", self.cell(x, y))?;
            }
        }
        Ok(())
    }
}
