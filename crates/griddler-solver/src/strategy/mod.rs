//! Solving policies.
//!
//! Each policy implements the one [`Strategy`] trait; callers pick a policy,
//! hand it a grid, and read the [`SolveOutcome`](crate::SolveOutcome). The
//! stepwise methods exist for consumers that animate a solve one small
//! mutation at a time; they never change what a policy can or cannot solve.

use std::fmt::Debug;

use griddler_core::Grid;

use crate::SolveOutcome;

pub use self::{
    backtracking::Backtracking, line_propagation::LinePropagation, overlap::Overlap,
    random_walk::RandomWalk,
};

mod backtracking;
mod line_propagation;
mod overlap;
mod random_walk;

/// A nonogram solving policy.
///
/// [`solve`](Self::solve) mutates the grid in place and returns the outcome;
/// the same data stays available through [`statistics`](Self::statistics)
/// until the next solve or [`reset_statistics`](Self::reset_statistics).
///
/// # Stepwise mode
///
/// After [`set_step_mode(true)`](Self::set_step_mode), drive the solve with
/// [`execute_next_step`](Self::execute_next_step) instead of
/// [`solve`](Self::solve); each call performs one small unit of work and
/// returns `true` while more remain.
pub trait Strategy: Debug + Send + Sync {
    /// Human-readable policy name.
    fn name(&self) -> &'static str;

    /// Solves the grid in place as far as the policy can.
    fn solve(&mut self, grid: &mut Grid) -> SolveOutcome;

    /// Statistics of the solve in progress or last finished.
    fn statistics(&self) -> &SolveOutcome;

    /// Clears statistics and any stepwise progress.
    fn reset_statistics(&mut self);

    /// Enables or disables stepwise solving. Resets statistics.
    fn set_step_mode(&mut self, enabled: bool);

    /// Performs one unit of work in stepwise mode.
    ///
    /// Returns `true` while more steps remain. Outside stepwise mode this is
    /// a no-op returning `false`.
    fn execute_next_step(&mut self, grid: &mut Grid) -> bool;

    /// Whether another stepwise call can make progress.
    fn has_next_step(&self) -> bool;

    /// Number of steps taken so far.
    fn current_step(&self) -> usize;
}

/// An owned, dynamically typed strategy.
pub type BoxedStrategy = Box<dyn Strategy>;

/// Every available policy, cheapest-to-try first.
#[must_use]
pub fn all_strategies() -> Vec<BoxedStrategy> {
    vec![
        Box::new(Overlap::new()),
        Box::new(LinePropagation::new()),
        Box::new(Backtracking::new()),
        Box::new(RandomWalk::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_strategies_have_distinct_names() {
        let strategies = all_strategies();
        assert_eq!(strategies.len(), 4);
        for (i, a) in strategies.iter().enumerate() {
            for b in &strategies[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
