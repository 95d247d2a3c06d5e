#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching-cell heuristics.

use crate::engine::grid::{Grid, Position};

/// Chooses the next open cell for the search to branch on.
pub trait CellSelection: Default {
    /// Picks an open cell, or `None` if the grid is complete.
    fn pick(&self, grid: &Grid) -> Option<Position>;
}

/// Most-constrained-cell heuristic: the open cell with the smallest
/// domain, ties broken by the lowest `(row, col)` for determinism.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumRemaining;

impl CellSelection for MinimumRemaining {
    fn pick(&self, grid: &Grid) -> Option<Position> {
        let mut best: Option<(usize, Position)> = None;
        for pos in grid.positions() {
            if grid.value(pos).is_some() {
                continue;
            }
            let len = grid.domain(pos).len();
            if best.is_none_or(|(b, _)| len < b) {
                best = Some((len, pos));
                if len <= 1 {
                    break;
                }
            }
        }
        best.map(|(_, pos)| pos)
    }
}

/// Takes the first open cell in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOpen;

impl CellSelection for FirstOpen {
    fn pick(&self, grid: &Grid) -> Option<Position> {
        grid.positions().find(|&pos| grid.value(pos).is_none())
    }
}
