#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The caller-facing solving surface.
//!
//! [`Solver`] wraps the search engine behind three questions: what is the
//! solution, how many solutions are there (up to a limit), and is the
//! solution unique. Uniqueness matters because puzzle generation depends
//! on distinguishing a puzzle with one solution from one with several; a
//! plain feasible/infeasible answer cannot make that distinction.

use crate::engine::budget::Budget;
use crate::engine::grid::Grid;
use crate::engine::search::{Search, SearchStats};

/// The outcome of solving a grid.
///
/// Every variant is an ordinary value the caller must handle; none of
/// them is an error. Grids with contradictory clues cannot be
/// constructed in the first place, so a solve call never observes one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// Exactly one completion exists.
    Unique(Grid),
    /// At least two completions exist.
    Multiple,
    /// No completion exists.
    Infeasible,
    /// The search budget ran out before a verdict was reached.
    Timeout,
}

impl SolveResult {
    /// The unique solution, if this result carries one.
    #[must_use]
    pub fn into_unique(self) -> Option<Grid> {
        match self {
            Self::Unique(grid) => Some(grid),
            _ => None,
        }
    }
}

/// Exact solver with an optional search budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    budget: Budget,
}

impl Solver {
    /// Creates a solver with an unlimited budget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            budget: Budget::unlimited(),
        }
    }

    /// Creates a solver that aborts once `budget` is exceeded, reporting
    /// [`SolveResult::Timeout`].
    #[must_use]
    pub const fn with_budget(budget: Budget) -> Self {
        Self { budget }
    }

    /// Solves `grid`, classifying it as uniquely solvable, ambiguous or
    /// infeasible. Searches for at most two solutions, so "ambiguous"
    /// costs no more than the second solution.
    #[must_use]
    pub fn solve(&self, grid: &Grid) -> SolveResult {
        self.solve_with_stats(grid).0
    }

    /// Like [`Self::solve`], additionally returning the search counters
    /// for reporting.
    #[must_use]
    pub fn solve_with_stats(&self, grid: &Grid) -> (SolveResult, SearchStats) {
        let mut search: Search = Search::new().with_budget(self.budget);
        let outcome = search.count_solutions(grid, 2);

        let result = if outcome.aborted {
            SolveResult::Timeout
        } else {
            match (outcome.count, outcome.solution) {
                (0, _) => SolveResult::Infeasible,
                (1, Some(solution)) => SolveResult::Unique(solution),
                _ => SolveResult::Multiple,
            }
        };
        (result, search.stats())
    }

    /// Counts solutions of `grid`, stopping early at `limit`. An aborted
    /// run reports the solutions found so far.
    #[must_use]
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        let mut search: Search = Search::new().with_budget(self.budget);
        search.count_solutions(grid, limit).count
    }

    /// Whether `grid` has exactly one completion. A budget-aborted count
    /// is not proof, so it answers `false`.
    #[must_use]
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        let mut search: Search = Search::new().with_budget(self.budget);
        let outcome = search.count_solutions(grid, 2);
        !outcome.aborted && outcome.count == 1
    }
}
