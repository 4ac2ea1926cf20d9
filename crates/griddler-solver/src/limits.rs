//! Search budgets.

use std::time::Duration;

use griddler_core::Grid;

/// Explicit budgets for the backtracking search.
///
/// Limits are a parameter of each solve, not baked-in constants; a caller
/// that wants a quick probe and one that wants an exhaustive attempt simply
/// pass different values.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use griddler_solver::SearchLimits;
///
/// let quick = SearchLimits {
///     max_backtracks: 500,
///     max_time: Duration::from_millis(50),
///     ..SearchLimits::default()
/// };
/// assert_eq!(quick.max_backtracks, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of backtracks before giving up.
    pub max_backtracks: usize,
    /// Maximum wall-clock time before giving up.
    pub max_time: Duration,
    /// Recursion depth ceiling; `None` means one level per grid cell.
    pub max_depth: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_backtracks: 100_000,
            max_time: Duration::from_secs(120),
            max_depth: None,
        }
    }
}

impl SearchLimits {
    /// The effective depth ceiling for a grid.
    #[must_use]
    pub fn depth_ceiling(&self, grid: &Grid) -> usize {
        self.max_depth.unwrap_or_else(|| grid.total_cells())
    }
}
