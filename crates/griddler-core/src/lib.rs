//! Core data structures for nonogram (picross) solving.
//!
//! This crate provides the grid model and the shared line combinatorics used
//! by every solving and validation component.
//!
//! # Overview
//!
//! 1. **Core types**
//!    - [`cell`]: the tri-state cell ([`CellState`])
//!    - [`clue`]: block-length clues for a single line ([`Clue`]) and for a
//!      whole puzzle ([`ClueSet`])
//!    - [`line`]: row/column identification ([`Line`])
//!    - [`solution`]: an immutable filled/blank mask ([`SolutionGrid`]) used
//!      as an optional solve target and as a clue source
//! 2. **The grid** - [`grid`]: the mutable cell matrix plus its clues,
//!    with snapshot/restore support for speculative search
//! 3. **Line combinatorics** - [`possibility`]: enumeration of every filling
//!    of a line consistent with a clue and a partial assignment; [`runs`]:
//!    run extraction, completed-line matching, contradiction and
//!    prefix-consistency checks
//!
//! The combinatorics live here, in one place, so that the solver and the
//! uniqueness validator cannot drift apart.
//!
//! # Examples
//!
//! ```
//! use griddler_core::{Clue, ClueSet, Grid, possibility};
//!
//! let clues = ClueSet::new(
//!     vec![Clue::new([1]), Clue::new([1])],
//!     vec![Clue::new([1]), Clue::new([1])],
//! )?;
//! let grid = Grid::new(clues);
//!
//! // Every filling of a `[1]` clue on a line of length 2.
//! let fillings = possibility::possible_lines(
//!     grid.clues().row(0),
//!     &grid.line_cells(griddler_core::Line::Row { y: 0 }),
//! );
//! assert_eq!(fillings.len(), 2);
//! # Ok::<(), griddler_core::InvalidClueError>(())
//! ```

pub mod cell;
pub mod clue;
pub mod grid;
pub mod line;
pub mod possibility;
pub mod runs;
pub mod solution;

pub use self::{
    cell::CellState,
    clue::{Clue, ClueSet, InvalidClueError},
    grid::{Grid, GridSnapshot},
    line::Line,
    solution::{ParseSolutionError, SolutionGrid},
};
