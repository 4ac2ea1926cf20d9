//! Exhaustive enumeration of line fillings.
//!
//! For a clue and a partial line, the possibility set is every complete
//! filling (each cell [`Filled`](CellState::Filled) or
//! [`Excluded`](CellState::Excluded)) that realizes exactly the clue's blocks
//! in order and agrees with every already-determined cell of the partial.
//!
//! Both the solver's deduction and the uniqueness validator go through this
//! module, so their notions of "a line filling consistent with a clue" are
//! the same by construction. Enumeration is exponential in the block count in
//! the worst case, but it only ever runs on single lines of bounded length.

use crate::{CellState, Clue};

/// Enumerates every filling of a line consistent with its clue and with the
/// given partial assignment.
///
/// The line length is the length of `partial`. Undetermined cells impose no
/// constraint; determined cells must be reproduced verbatim.
///
/// # Examples
///
/// ```
/// use griddler_core::{CellState, Clue, possibility};
///
/// let partial = [CellState::Undetermined; 5];
/// let fillings = possibility::possible_lines(&Clue::new([2, 1]), &partial);
/// assert_eq!(fillings.len(), 3);
///
/// use griddler_core::CellState::{Excluded as X, Filled as F};
/// assert!(fillings.iter().any(|line| **line == [F, F, X, F, X]));
/// ```
#[must_use]
pub fn possible_lines(clue: &Clue, partial: &[CellState]) -> Vec<Box<[CellState]>> {
    let mut results = Vec::new();
    if clue.is_empty() {
        // The only filling of an empty line, unless a cell is already filled.
        if !partial.contains(&CellState::Filled) {
            results.push(vec![CellState::Excluded; partial.len()].into_boxed_slice());
        }
        return results;
    }
    let mut scratch = vec![CellState::Excluded; partial.len()];
    place_blocks(clue.blocks(), partial, 0, 0, &mut scratch, &mut results);
    results
}

/// Enumerates every filling of an unconstrained line of length `len`.
///
/// Equivalent to [`possible_lines`] with an all-undetermined partial.
#[must_use]
pub fn enumerate_line(clue: &Clue, len: usize) -> Vec<Box<[CellState]>> {
    possible_lines(clue, &vec![CellState::Undetermined; len])
}

/// Whether a complete filling agrees with every determined cell of a partial.
#[must_use]
pub fn agrees_with(candidate: &[CellState], partial: &[CellState]) -> bool {
    candidate
        .iter()
        .zip(partial)
        .all(|(&cell, &known)| known == CellState::Undetermined || cell == known)
}

/// Places block `index` and everything after it, trying every legal start.
fn place_blocks(
    blocks: &[u16],
    partial: &[CellState],
    pos: usize,
    index: usize,
    scratch: &mut [CellState],
    results: &mut Vec<Box<[CellState]>>,
) {
    let len = partial.len();
    if index >= blocks.len() {
        for cell in &mut scratch[pos..] {
            *cell = CellState::Excluded;
        }
        if agrees_with(scratch, partial) {
            results.push(Box::from(&*scratch));
        }
        return;
    }

    let block = blocks[index] as usize;
    // Room for this block plus every later block and its separating gap.
    let min_space: usize = block
        + blocks[index + 1..]
            .iter()
            .map(|&later| 1 + later as usize)
            .sum::<usize>();
    let Some(last_start) = len.checked_sub(min_space) else {
        return;
    };

    for start in pos..=last_start {
        for cell in &mut scratch[pos..start] {
            *cell = CellState::Excluded;
        }
        for cell in &mut scratch[start..start + block] {
            *cell = CellState::Filled;
        }
        let mut next = start + block;
        if index + 1 < blocks.len() && next < len {
            scratch[next] = CellState::Excluded;
            next += 1;
        }
        place_blocks(blocks, partial, next, index + 1, scratch, results);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::CellState::{Excluded as X, Filled as F, Undetermined as U};
    use crate::{ClueSet, SolutionGrid, runs};

    #[test]
    fn test_empty_clue_single_all_excluded() {
        let fillings = possible_lines(&Clue::new([]), &[U, U, U]);
        assert_eq!(fillings.len(), 1);
        assert_eq!(*fillings[0], [X, X, X]);
    }

    #[test]
    fn test_empty_clue_rejected_by_filled_cell() {
        let fillings = possible_lines(&Clue::new([]), &[U, F, U]);
        assert!(fillings.is_empty());
    }

    #[test]
    fn test_two_one_in_five() {
        let fillings = possible_lines(&Clue::new([2, 1]), &[U; 5]);
        assert_eq!(fillings.len(), 3);
        assert!(fillings.iter().any(|line| **line == [F, F, X, F, X]));
        assert!(fillings.iter().any(|line| **line == [F, F, X, X, F]));
        assert!(fillings.iter().any(|line| **line == [X, F, F, X, F]));
    }

    #[test]
    fn test_full_line_block() {
        let fillings = possible_lines(&Clue::new([4]), &[U; 4]);
        assert_eq!(fillings.len(), 1);
        assert_eq!(*fillings[0], [F, F, F, F]);
    }

    #[test]
    fn test_partial_prunes_incompatible_fillings() {
        // A filled cell at position 0 rules out the two right-shifted options
        let fillings = possible_lines(&Clue::new([1]), &[F, U, U]);
        assert_eq!(fillings.len(), 1);
        assert_eq!(*fillings[0], [F, X, X]);
    }

    #[test]
    fn test_excluded_cell_prunes() {
        let fillings = possible_lines(&Clue::new([2]), &[X, U, U]);
        assert_eq!(fillings.len(), 1);
        assert_eq!(*fillings[0], [X, F, F]);
    }

    #[test]
    fn test_overfull_clue_has_no_fillings() {
        let fillings = possible_lines(&Clue::new([3, 2]), &[U; 5]);
        assert!(fillings.is_empty());
    }

    #[test]
    fn test_enumerate_line_matches_unconstrained() {
        let clue = Clue::new([1, 1]);
        assert_eq!(enumerate_line(&clue, 4), possible_lines(&clue, &[U; 4]));
    }

    fn arbitrary_partial(len: usize) -> impl Strategy<Value = Vec<CellState>> {
        proptest::collection::vec(
            prop_oneof![3 => Just(U), 1 => Just(F), 1 => Just(X)],
            len..=len,
        )
    }

    proptest! {
        // Every generated filling realizes the clue exactly and agrees with
        // the partial it was generated from.
        #[test]
        fn prop_fillings_satisfy_clue_and_partial(
            blocks in proptest::collection::vec(1u16..=3, 0..3),
            partial in arbitrary_partial(8),
        ) {
            let clue = Clue::new(blocks);
            for filling in possible_lines(&clue, &partial) {
                prop_assert!(runs::satisfies(&filling, &clue));
                prop_assert!(agrees_with(&filling, &partial));
                prop_assert!(filling.iter().all(|cell| cell.is_determined()));
            }
        }

        // A line taken from a real solution always appears in the possibility
        // set of the clue derived from it.
        #[test]
        fn prop_solution_line_is_generated(
            rows in proptest::collection::vec(
                proptest::collection::vec(proptest::bool::ANY, 6..=6),
                1..5,
            ),
        ) {
            let solution = SolutionGrid::from_rows(rows.clone()).unwrap();
            let clues = ClueSet::from_solution(&solution);
            for (y, row) in rows.iter().enumerate() {
                let line: Vec<CellState> =
                    row.iter().map(|&filled| if filled { F } else { X }).collect();
                let fillings = enumerate_line(clues.row(y), row.len());
                prop_assert!(fillings.iter().any(|filling| **filling == *line));
            }
        }
    }
}
