//! Clue-set uniqueness validation.
//!
//! Before a puzzle is handed to a solver (or a player), its clue set should
//! admit exactly one grid. [`has_unique_solution`] certifies this with no
//! known answer in hand: a bounded depth-first enumeration places whole rows
//! and prunes on partial column consistency, counting full solutions until
//! it can stop.
//!
//! The enumeration goes through the same
//! [`possibility`](griddler_core::possibility) module as the solver, so a
//! clue set validated here is by construction one the solver agrees about.
//!
//! # Examples
//!
//! ```
//! use griddler_core::{Clue, ClueSet};
//! use griddler_validator::has_unique_solution;
//!
//! // A diamond: exactly one grid fits.
//! let diamond = ClueSet::new(
//!     vec![Clue::new([1]), Clue::new([3]), Clue::new([5]), Clue::new([3]), Clue::new([1])],
//!     vec![Clue::new([1]), Clue::new([3]), Clue::new([5]), Clue::new([3]), Clue::new([1])],
//! )?;
//! assert!(has_unique_solution(&diamond));
//!
//! // Single cells everywhere: any permutation pattern fits.
//! let ambiguous = ClueSet::new(
//!     vec![Clue::new([1]); 5],
//!     vec![Clue::new([1]); 5],
//! )?;
//! assert!(!has_unique_solution(&ambiguous));
//! # Ok::<(), griddler_core::InvalidClueError>(())
//! ```

use griddler_core::{CellState, Clue, ClueSet, possibility, runs};

/// Whether a clue set admits exactly one grid.
///
/// Counts solutions up to two and stops; both "no solution" and "more than
/// one" yield `false`. Use [`SolutionCounter`] directly to tell the two
/// apart.
#[must_use]
pub fn has_unique_solution(clues: &ClueSet) -> bool {
    SolutionCounter::new(clues).count_up_to(2) == 1
}

/// A bounded solution counter over a clue set.
///
/// Works on a private grid; it never touches caller state and never uses a
/// solving strategy.
///
/// # Examples
///
/// ```
/// use griddler_core::{Clue, ClueSet};
/// use griddler_validator::SolutionCounter;
///
/// // A single cell per line: the two diagonal grids both fit.
/// let clues = ClueSet::new(
///     vec![Clue::new([1]), Clue::new([1])],
///     vec![Clue::new([1]), Clue::new([1])],
/// )?;
/// assert_eq!(SolutionCounter::new(&clues).count_up_to(10), 2);
/// # Ok::<(), griddler_core::InvalidClueError>(())
/// ```
#[derive(Debug)]
pub struct SolutionCounter {
    clues: ClueSet,
    row_options: Vec<Vec<Box<[CellState]>>>,
    grid: Vec<CellState>,
    found: usize,
    limit: usize,
}

impl SolutionCounter {
    /// Prepares a counter for a clue set.
    ///
    /// Row placements are enumerated once per row up front; the search
    /// itself allocates nothing beyond column scratch buffers.
    #[must_use]
    pub fn new(clues: &ClueSet) -> Self {
        let width = clues.width();
        let row_options = clues
            .rows()
            .iter()
            .map(|clue| possibility::enumerate_line(clue, width))
            .collect();
        Self {
            clues: clues.clone(),
            row_options,
            grid: vec![CellState::Undetermined; width * clues.height()],
            found: 0,
            limit: 0,
        }
    }

    /// Counts full solutions, stopping as soon as `limit` are found.
    ///
    /// Returns a value in `0..=limit`.
    pub fn count_up_to(&mut self, limit: usize) -> usize {
        self.found = 0;
        self.limit = limit;
        if limit > 0 {
            self.place_row(0);
        }
        log::debug!(
            "{}x{} clue set: {} solution(s) within limit {limit}",
            self.clues.width(),
            self.clues.height(),
            self.found
        );
        self.found
    }

    fn place_row(&mut self, y: usize) {
        if self.found >= self.limit {
            return;
        }
        if y == self.clues.height() {
            if self.columns_complete() {
                self.found += 1;
            }
            return;
        }

        for i in 0..self.row_options[y].len() {
            let option = self.row_options[y][i].clone();
            let width = self.clues.width();
            self.grid[y * width..(y + 1) * width].copy_from_slice(&option);

            if self.columns_consistent_through(y) {
                self.place_row(y + 1);
                if self.found >= self.limit {
                    return;
                }
            }
        }
    }

    /// Checks every column prefix against its clue after row `y` was placed.
    fn columns_consistent_through(&self, y: usize) -> bool {
        (0..self.clues.width())
            .all(|x| runs::prefix_consistent(&self.column_prefix(x, y), self.column_clue(x)))
    }

    /// Full-height check used once the last row is in place.
    fn columns_complete(&self) -> bool {
        let width = self.clues.width();
        let height = self.clues.height();
        (0..width).all(|x| {
            let column: Vec<CellState> = (0..height).map(|y| self.grid[y * width + x]).collect();
            runs::satisfies(&column, self.column_clue(x))
        })
    }

    fn column_prefix(&self, x: usize, through_y: usize) -> Vec<CellState> {
        let width = self.clues.width();
        (0..=through_y).map(|y| self.grid[y * width + x]).collect()
    }

    fn column_clue(&self, x: usize) -> &Clue {
        self.clues.column(x)
    }
}

#[cfg(test)]
mod tests {
    use griddler_core::{Grid, SolutionGrid};
    use griddler_solver::{Backtracking, Strategy as _};
    use proptest::prelude::*;

    use super::*;

    fn square(clue: Clue, size: usize) -> ClueSet {
        ClueSet::new(vec![clue.clone(); size], vec![clue; size]).unwrap()
    }

    fn clues_of(pattern: &str) -> ClueSet {
        let solution: SolutionGrid = pattern.parse().unwrap();
        ClueSet::from_solution(&solution)
    }

    #[test]
    fn test_diamond_is_unique() {
        let clues = clues_of(
            "
            ..#..
            .###.
            #####
            .###.
            ..#..
        ",
        );
        assert!(has_unique_solution(&clues));
    }

    #[test]
    fn test_all_singles_is_ambiguous() {
        // Any permutation pattern satisfies every clue
        let clues = square(Clue::new([1]), 5);
        assert!(!has_unique_solution(&clues));
        assert_eq!(SolutionCounter::new(&clues).count_up_to(2), 2);
    }

    #[test]
    fn test_unsatisfiable_counts_zero() {
        // Rows demand two filled cells, columns demand four
        let clues = ClueSet::new(
            vec![Clue::new([1]), Clue::new([1])],
            vec![Clue::new([2]), Clue::new([2])],
        )
        .unwrap();
        assert!(!has_unique_solution(&clues));
        assert_eq!(SolutionCounter::new(&clues).count_up_to(2), 0);
    }

    #[test]
    fn test_empty_clues_describe_the_blank_grid() {
        // All-excluded is a grid too, and it is the only one
        let clues = square(Clue::new([]), 3);
        assert!(has_unique_solution(&clues));
    }

    #[test]
    fn test_full_clues_describe_the_full_grid() {
        let clues = square(Clue::new([3]), 3);
        assert!(has_unique_solution(&clues));
    }

    #[test]
    fn test_two_by_two_diagonals_are_ambiguous() {
        let clues = square(Clue::new([1]), 2);
        assert_eq!(SolutionCounter::new(&clues).count_up_to(5), 2);
    }

    #[test]
    fn test_count_is_capped_by_limit() {
        let clues = square(Clue::new([1]), 5);
        assert_eq!(SolutionCounter::new(&clues).count_up_to(1), 1);
        assert_eq!(SolutionCounter::new(&clues).count_up_to(3), 3);
    }

    #[test]
    fn test_zero_limit_counts_nothing() {
        let clues = square(Clue::new([3]), 3);
        assert_eq!(SolutionCounter::new(&clues).count_up_to(0), 0);
    }

    #[test]
    fn test_validated_clue_set_is_solved_exactly_by_the_solver() {
        let pattern = "
            ..#..
            .###.
            #####
            .###.
            ..#..
        ";
        let solution: SolutionGrid = pattern.parse().unwrap();
        let clues = ClueSet::from_solution(&solution);
        assert!(has_unique_solution(&clues));

        let mut grid = Grid::new(clues);
        let outcome = Backtracking::new().solve(&mut grid);
        assert!(outcome.solved);
        assert_eq!(grid.to_string(), solution.to_string());
    }

    proptest! {
        // Clues derived from a real pattern admit that pattern, so the
        // bounded count is never zero.
        #[test]
        fn prop_derived_clues_have_at_least_one_solution(
            rows in proptest::collection::vec(
                proptest::collection::vec(proptest::bool::ANY, 4..=4),
                1..5,
            ),
        ) {
            let solution = SolutionGrid::from_rows(rows).unwrap();
            let clues = ClueSet::from_solution(&solution);
            prop_assert!(SolutionCounter::new(&clues).count_up_to(2) >= 1);
        }
    }
}
