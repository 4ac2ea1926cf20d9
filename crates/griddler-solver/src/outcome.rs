//! Solve results and statistics.

use std::{
    fmt::{self, Display},
    time::Duration,
};

/// Why a solve ended without a solved grid.
///
/// Resource limits ([`Timeout`](Self::Timeout),
/// [`BacktrackLimit`](Self::BacktrackLimit), [`DepthLimit`](Self::DepthLimit),
/// [`AttemptLimit`](Self::AttemptLimit)) are distinct from genuine dead ends
/// ([`Exhausted`](Self::Exhausted), [`Contradiction`](Self::Contradiction))
/// and from a mere lack of deductive power ([`Stalled`](Self::Stalled)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum FailureReason {
    /// Deduction reached a fixed point with the grid still unsolved.
    #[display("deduction stalled; search is required")]
    Stalled,
    /// Some line admits no filling compatible with its clue.
    #[display("a line admits no filling compatible with its clue")]
    Contradiction,
    /// The wall-clock budget ran out.
    #[display("wall-clock budget exceeded")]
    Timeout,
    /// The backtrack budget ran out.
    #[display("backtrack budget exceeded")]
    BacktrackLimit,
    /// The recursion depth ceiling was hit.
    #[display("recursion depth ceiling exceeded")]
    DepthLimit,
    /// Every branch of every assignment failed back to the root.
    #[display("every branch was tried and failed")]
    Exhausted,
    /// The random attempt budget ran out.
    #[display("attempt budget exceeded")]
    AttemptLimit,
}

/// Statistics and result of one solve invocation.
///
/// Cells committed by deduction during the initial propagation phase count
/// as deduced; everything determined after that (guesses and their
/// consequences) counts as guessed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveOutcome {
    /// Whether the grid ended up solved.
    pub solved: bool,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    /// Work steps taken (propagation sweeps plus search nodes).
    pub steps: usize,
    /// Number of backtracks performed.
    pub backtracks: usize,
    /// Cells determined by pure deduction.
    pub deduced_cells: usize,
    /// Cells determined during search.
    pub guessed_cells: usize,
    /// Fraction of cells determined at the end, in `0.0..=1.0`.
    pub completion: f64,
    /// Why the solve failed, when it did.
    pub failure: Option<FailureReason>,
}

impl Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "solved: {}", if self.solved { "yes" } else { "no" })?;
        writeln!(f, "elapsed: {:?}", self.elapsed)?;
        writeln!(f, "steps: {}", self.steps)?;
        writeln!(f, "backtracks: {}", self.backtracks)?;
        writeln!(f, "deduced cells: {}", self.deduced_cells)?;
        writeln!(f, "guessed cells: {}", self.guessed_cells)?;
        writeln!(f, "completion: {:.1}%", self.completion * 100.0)?;
        match &self.failure {
            Some(reason) => write!(f, "failure: {reason}"),
            None => write!(f, "failure: -"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_outcome() {
        let outcome = SolveOutcome::default();
        assert!(!outcome.solved);
        assert_eq!(outcome.failure, None);
        assert_eq!(outcome.steps, 0);
    }

    #[test]
    fn test_display_mentions_failure() {
        let outcome = SolveOutcome {
            failure: Some(FailureReason::BacktrackLimit),
            ..SolveOutcome::default()
        };
        let text = outcome.to_string();
        assert!(text.contains("solved: no"));
        assert!(text.contains("backtrack budget exceeded"));
    }
}
