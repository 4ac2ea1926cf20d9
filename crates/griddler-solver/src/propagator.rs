//! Line-by-line constraint propagation.
//!
//! The propagator commits a cell only when every filling of its line agrees
//! on the value, so everything it writes is logically forced. It is sound
//! but incomplete: puzzles that need case-split reasoning reach a fixed
//! point unsolved and are handed to the search.

use griddler_core::{CellState, Grid, Line, possibility};

/// A line whose possibility set is empty: no filling is compatible with its
/// clue and the current partial assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{line} admits no filling compatible with its clue")]
pub struct Contradiction {
    /// The unsatisfiable line.
    pub line: Line,
}

/// What a run to the fixed point accomplished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Cells committed across all sweeps.
    pub committed: usize,
    /// Full row-plus-column sweeps performed.
    pub sweeps: usize,
}

/// Sweeps rows and columns until no sweep commits a cell or the grid is
/// solved.
///
/// Idempotent: a second call immediately after convergence commits nothing.
///
/// # Errors
///
/// Returns [`Contradiction`] as soon as some line's possibility set is
/// empty. Cells committed by earlier sweeps remain in place.
pub fn propagate(grid: &mut Grid) -> Result<PropagationReport, Contradiction> {
    let mut report = PropagationReport::default();
    loop {
        let committed = sweep(grid)?;
        report.sweeps += 1;
        report.committed += committed;
        if committed == 0 || grid.is_solved() {
            return Ok(report);
        }
    }
}

/// Runs one deduction pass over every row, then every column.
///
/// Returns the number of cells committed.
///
/// # Errors
///
/// Returns [`Contradiction`] for the first line with an empty possibility
/// set.
pub fn sweep(grid: &mut Grid) -> Result<usize, Contradiction> {
    let mut committed = 0;
    for line in Line::all(grid.width(), grid.height()) {
        committed += deduce_line(grid, line)?;
    }
    Ok(committed)
}

/// Commits every cell of one line on which all of its fillings agree.
///
/// Returns the number of cells committed.
///
/// # Errors
///
/// Returns [`Contradiction`] when the line has no filling at all.
pub fn deduce_line(grid: &mut Grid, line: Line) -> Result<usize, Contradiction> {
    let cells = grid.line_cells(line);
    let fillings = possibility::possible_lines(grid.clues().clue(line), &cells);
    if fillings.is_empty() {
        return Err(Contradiction { line });
    }

    let mut committed = 0;
    for (i, &current) in cells.iter().enumerate() {
        if current != CellState::Undetermined {
            continue;
        }
        let first = fillings[0][i];
        if fillings[1..].iter().all(|filling| filling[i] == first) {
            grid.set_line_cell(line, i, first);
            committed += 1;
        }
    }
    Ok(committed)
}
