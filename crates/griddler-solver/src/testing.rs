//! Shared puzzle fixtures for solver tests.

use griddler_core::{ClueSet, Grid, SolutionGrid};

/// A 5x5 diamond; unique, and solvable by deduction alone.
pub(crate) const DIAMOND: &str = "
    ..#..
    .###.
    #####
    .###.
    ..#..
";

/// A 5x5 cross; unique, and solvable by deduction alone.
pub(crate) const CROSS: &str = "
    ..#..
    ..#..
    #####
    ..#..
    ..#..
";

pub(crate) fn diamond_solution() -> SolutionGrid {
    DIAMOND.parse().unwrap()
}

pub(crate) fn diamond_grid() -> Grid {
    Grid::new(ClueSet::from_solution(&diamond_solution()))
}

pub(crate) fn cross_solution() -> SolutionGrid {
    CROSS.parse().unwrap()
}

pub(crate) fn cross_grid() -> Grid {
    Grid::new(ClueSet::from_solution(&cross_solution()))
}

/// A square clue set with every clue `[1]`; satisfiable by any permutation
/// pattern, so deduction alone can force nothing.
pub(crate) fn permutation_clues(size: usize) -> ClueSet {
    let single = griddler_core::Clue::new([1]);
    ClueSet::new(vec![single.clone(); size], vec![single; size]).unwrap()
}
