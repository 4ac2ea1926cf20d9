//! Block-length clues.

use std::fmt::{self, Display};

use tinyvec::TinyVec;

use crate::{Line, SolutionGrid};

/// Inline storage for one line's block lengths.
///
/// Clue lists are short on the grid sizes this engine targets, so they live
/// inline until they outgrow the backing array.
type BlockLengths = TinyVec<[u16; 8]>;

/// The clue for a single line: ordered lengths of its filled blocks.
///
/// Blocks appear left to right (or top to bottom for columns), each separated
/// from the next by at least one excluded cell. An empty clue means the whole
/// line is excluded.
///
/// # Examples
///
/// ```
/// use griddler_core::Clue;
///
/// let clue = Clue::new([2, 1]);
/// assert_eq!(clue.blocks(), [2, 1]);
/// // Two blocks plus one separating gap.
/// assert_eq!(clue.min_line_len(), 4);
///
/// let empty = Clue::new([]);
/// assert!(empty.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Clue {
    blocks: BlockLengths,
}

impl Clue {
    /// Creates a clue from block lengths.
    ///
    /// A lone `0` is the conventional way of writing an empty line and is
    /// normalized to the empty clue. Zero lengths anywhere else are kept
    /// verbatim and rejected when a [`ClueSet`] is built.
    #[must_use]
    pub fn new<I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = u16>,
    {
        let blocks: BlockLengths = blocks.into_iter().collect();
        if blocks[..] == [0] {
            return Self::default();
        }
        Self { blocks }
    }

    /// The block lengths, left to right.
    #[inline]
    #[must_use]
    pub fn blocks(&self) -> &[u16] {
        &self.blocks
    }

    /// Number of blocks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the line contains no blocks at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of filled cells the clue demands.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.blocks.iter().map(|&block| block as usize).sum()
    }

    /// Minimum line length able to hold the clue: all blocks plus one gap
    /// between each pair.
    #[must_use]
    pub fn min_line_len(&self) -> usize {
        if self.blocks.is_empty() {
            return 0;
        }
        self.filled_count() + self.blocks.len() - 1
    }

    fn validate(&self, line: Line, line_len: usize) -> Result<(), InvalidClueError> {
        if let Some(index) = self.blocks.iter().position(|&block| block == 0) {
            return Err(InvalidClueError::ZeroBlock { line, index });
        }
        let needed = self.min_line_len();
        if needed > line_len {
            return Err(InvalidClueError::TooLong {
                line,
                needed,
                available: line_len,
            });
        }
        Ok(())
    }
}

impl FromIterator<u16> for Clue {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<const N: usize> From<[u16; N]> for Clue {
    fn from(blocks: [u16; N]) -> Self {
        Self::new(blocks)
    }
}

impl Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.blocks.is_empty() {
            return write!(f, "0");
        }
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// A malformed clue set, rejected at construction so it never reaches a
/// solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidClueError {
    /// A block length of zero inside a non-empty clue.
    #[display("block {index} of {line} has zero length")]
    ZeroBlock {
        /// The offending line.
        line: Line,
        /// Index of the zero-length block within the clue.
        index: usize,
    },
    /// The blocks plus their mandatory gaps do not fit in the line.
    #[display("{line} needs {needed} cells for its clue but only has {available}")]
    TooLong {
        /// The offending line.
        line: Line,
        /// Cells required by the blocks and gaps.
        needed: usize,
        /// Cells actually available.
        available: usize,
    },
    /// A solve target whose dimensions disagree with the clue counts.
    #[display(
        "target is {actual_width}x{actual_height} but the clues describe \
         {expected_width}x{expected_height}"
    )]
    TargetSize {
        /// Width implied by the column clue count.
        expected_width: usize,
        /// Height implied by the row clue count.
        expected_height: usize,
        /// Width of the supplied target.
        actual_width: usize,
        /// Height of the supplied target.
        actual_height: usize,
    },
}

/// The full clue set of a puzzle: one [`Clue`] per row and per column.
///
/// The grid dimensions are the clue counts: `height` rows and `width`
/// columns. Construction validates every clue against its line length.
///
/// # Examples
///
/// ```
/// use griddler_core::{Clue, ClueSet};
///
/// let clues = ClueSet::new(
///     vec![Clue::new([1]), Clue::new([3]), Clue::new([5]), Clue::new([3]), Clue::new([1])],
///     vec![Clue::new([1]), Clue::new([3]), Clue::new([5]), Clue::new([3]), Clue::new([1])],
/// )?;
/// assert_eq!((clues.width(), clues.height()), (5, 5));
/// # Ok::<(), griddler_core::InvalidClueError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueSet {
    rows: Vec<Clue>,
    columns: Vec<Clue>,
}

impl ClueSet {
    /// Builds a clue set from row clues (top to bottom) and column clues
    /// (left to right).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidClueError::ZeroBlock`] for a zero-length block inside
    /// a non-empty clue, or [`InvalidClueError::TooLong`] when a clue cannot
    /// fit in its line.
    pub fn new(rows: Vec<Clue>, columns: Vec<Clue>) -> Result<Self, InvalidClueError> {
        let width = columns.len();
        let height = rows.len();
        for (y, clue) in rows.iter().enumerate() {
            clue.validate(Line::Row { y }, width)?;
        }
        for (x, clue) in columns.iter().enumerate() {
            clue.validate(Line::Column { x }, height)?;
        }
        Ok(Self { rows, columns })
    }

    /// Derives the clue set from a known filled pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use griddler_core::{Clue, ClueSet, SolutionGrid};
    ///
    /// let solution: SolutionGrid = "##.\n..#".parse()?;
    /// let clues = ClueSet::from_solution(&solution);
    /// assert_eq!(clues.row(0), &Clue::new([2]));
    /// assert_eq!(clues.column(2), &Clue::new([1]));
    /// # Ok::<(), griddler_core::ParseSolutionError>(())
    /// ```
    #[must_use]
    pub fn from_solution(solution: &SolutionGrid) -> Self {
        let rows = (0..solution.height())
            .map(|y| blocks_of((0..solution.width()).map(|x| solution.is_filled(x, y))))
            .collect();
        let columns = (0..solution.width())
            .map(|x| blocks_of((0..solution.height()).map(|y| solution.is_filled(x, y))))
            .collect();
        Self { rows, columns }
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// All row clues, top to bottom.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Clue] {
        &self.rows
    }

    /// All column clues, left to right.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Clue] {
        &self.columns
    }

    /// The clue of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of range.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &Clue {
        &self.rows[y]
    }

    /// The clue of column `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is out of range.
    #[inline]
    #[must_use]
    pub fn column(&self, x: usize) -> &Clue {
        &self.columns[x]
    }

    /// The clue of an arbitrary line.
    ///
    /// # Panics
    ///
    /// Panics if the line is out of range.
    #[must_use]
    pub fn clue(&self, line: Line) -> &Clue {
        match line {
            Line::Row { y } => self.row(y),
            Line::Column { x } => self.column(x),
        }
    }

    /// Length of a line: the grid width for rows, the height for columns.
    #[must_use]
    pub fn line_len(&self, line: Line) -> usize {
        match line {
            Line::Row { .. } => self.width(),
            Line::Column { .. } => self.height(),
        }
    }
}

/// Collects the maximal runs of `true` in a boolean sequence.
fn blocks_of<I>(cells: I) -> Clue
where
    I: IntoIterator<Item = bool>,
{
    let mut blocks = BlockLengths::default();
    let mut current = 0u16;
    for filled in cells {
        if filled {
            current += 1;
        } else if current > 0 {
            blocks.push(current);
            current = 0;
        }
    }
    if current > 0 {
        blocks.push(current);
    }
    Clue { blocks }
}
