//! Known solution patterns.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// An immutable filled/blank mask for a whole grid.
///
/// Used as the optional solve target of a [`Grid`](crate::Grid) (to
/// short-circuit solved-checks) and as the input of
/// [`ClueSet::from_solution`](crate::ClueSet::from_solution).
///
/// Parses from a string with one row per whitespace-separated chunk, `#` for
/// filled and `.` or `_` for blank:
///
/// ```
/// use griddler_core::SolutionGrid;
///
/// let solution: SolutionGrid = "
///     .#.
///     ####
///     .#.
/// "
/// .parse()?;
/// assert_eq!((solution.width(), solution.height()), (3, 3));
/// assert!(solution.is_filled(1, 0));
/// assert!(!solution.is_filled(0, 0));
/// # Ok::<(), griddler_core::ParseSolutionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionGrid {
    width: usize,
    height: usize,
    filled: Box<[bool]>,
}

impl SolutionGrid {
    /// Builds a solution from rows of booleans (`true` = filled).
    ///
    /// # Errors
    ///
    /// Returns [`ParseSolutionError::Empty`] when no rows are given and
    /// [`ParseSolutionError::RaggedRow`] when rows differ in length.
    pub fn from_rows<I>(rows: I) -> Result<Self, ParseSolutionError>
    where
        I: IntoIterator<Item = Vec<bool>>,
    {
        let mut filled = Vec::new();
        let mut width = 0;
        let mut height = 0;
        for (y, row) in rows.into_iter().enumerate() {
            if y == 0 {
                width = row.len();
            } else if row.len() != width {
                return Err(ParseSolutionError::RaggedRow {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            filled.extend_from_slice(&row);
            height += 1;
        }
        if width == 0 || height == 0 {
            return Err(ParseSolutionError::Empty);
        }
        Ok(Self {
            width,
            height,
            filled: filled.into_boxed_slice(),
        })
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at `(x, y)` is filled.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of range.
    #[inline]
    #[must_use]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width && y < self.height, "position ({x}, {y}) out of range");
        self.filled[y * self.width + x]
    }

    /// Total number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.filled.iter().filter(|&&filled| filled).count()
    }
}

impl FromStr for SolutionGrid {
    type Err = ParseSolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (y, chunk) in s.split_whitespace().enumerate() {
            let mut row = Vec::with_capacity(chunk.len());
            for character in chunk.chars() {
                match character {
                    '#' => row.push(true),
                    '.' | '_' => row.push(false),
                    _ => return Err(ParseSolutionError::BadCharacter { row: y, character }),
                }
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }
}

impl Display for SolutionGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                write!(f, "{}", if self.is_filled(x, y) { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

/// A malformed solution pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSolutionError {
    /// The pattern has no rows or no columns.
    #[display("solution grid is empty")]
    Empty,
    /// A character other than `#`, `.`, or `_`.
    #[display("unexpected character {character:?} in solution row {row}")]
    BadCharacter {
        /// Row containing the character.
        row: usize,
        /// The offending character.
        character: char,
    },
    /// Rows of differing lengths.
    #[display("solution row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        /// The offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_query() {
        let solution: SolutionGrid = "#._\n.#.".parse().unwrap();
        assert_eq!((solution.width(), solution.height()), (3, 2));
        assert!(solution.is_filled(0, 0));
        assert!(!solution.is_filled(2, 0));
        assert!(solution.is_filled(1, 1));
        assert_eq!(solution.filled_count(), 2);
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        let result: Result<SolutionGrid, _> = "#x".parse();
        assert_eq!(
            result,
            Err(ParseSolutionError::BadCharacter {
                row: 0,
                character: 'x',
            })
        );
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let result: Result<SolutionGrid, _> = "##\n#".parse();
        assert_eq!(
            result,
            Err(ParseSolutionError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2,
            })
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        let result: Result<SolutionGrid, _> = "   ".parse();
        assert_eq!(result, Err(ParseSolutionError::Empty));
    }

    #[test]
    fn test_display_round_trip() {
        let text = "#..\n.##";
        let solution: SolutionGrid = text.parse().unwrap();
        assert_eq!(solution.to_string(), text);
    }
}
