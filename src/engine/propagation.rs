#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Fixed-point constraint propagation.
//!
//! Two rules are applied until nothing changes or a contradiction
//! surfaces:
//!
//! 1. **Naked single**: a cell whose domain holds exactly one candidate is
//!    assigned it, eliminating the digit from every peer domain.
//! 2. **Hidden single**: a digit with exactly one possible home inside a
//!    row, column or box is assigned there, even if that cell still has
//!    other candidates.
//!
//! Propagation never guesses, so it is always safe to run before or
//! between search decisions. A pass over the board is `O(N^3)` in the
//! side length and the loop aborts the moment any domain empties or a
//! digit loses its last home in a unit.

use crate::engine::digit_set::DigitSet;
use crate::engine::grid::{Grid, Position};

/// Outcome of running propagation to a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// The fixed point was reached and at least one cell was assigned.
    Progress,
    /// Nothing could be deduced; the grid is unchanged.
    Stable,
    /// Some domain emptied or a digit lost its last home in a unit.
    Contradiction,
}

/// The naked/hidden-single propagation engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Propagator;

impl Propagator {
    /// Runs both rules to a fixed point, mutating `grid` in place.
    pub fn propagate(grid: &mut Grid) -> Propagation {
        let mut progressed = false;
        loop {
            match Self::pass(grid) {
                Propagation::Progress => progressed = true,
                Propagation::Stable if progressed => return Propagation::Progress,
                Propagation::Stable => return Propagation::Stable,
                Propagation::Contradiction => return Propagation::Contradiction,
            }
        }
    }

    /// One pass of naked singles followed by hidden singles.
    fn pass(grid: &mut Grid) -> Propagation {
        let mut changed = false;

        match Self::naked_singles(grid) {
            Propagation::Progress => changed = true,
            Propagation::Contradiction => return Propagation::Contradiction,
            Propagation::Stable => {}
        }

        match Self::hidden_singles(grid) {
            Propagation::Progress => changed = true,
            Propagation::Contradiction => return Propagation::Contradiction,
            Propagation::Stable => {}
        }

        if changed {
            Propagation::Progress
        } else {
            Propagation::Stable
        }
    }

    fn naked_singles(grid: &mut Grid) -> Propagation {
        let mut changed = false;
        for pos in grid.positions() {
            if grid.value(pos).is_some() {
                continue;
            }
            let domain = grid.domain(pos);
            if domain.is_empty() {
                return Propagation::Contradiction;
            }
            if let Some(digit) = domain.single() {
                if !grid.place(pos, digit) {
                    return Propagation::Contradiction;
                }
                changed = true;
            }
        }
        if changed {
            Propagation::Progress
        } else {
            Propagation::Stable
        }
    }

    fn hidden_singles(grid: &mut Grid) -> Propagation {
        let mut changed = false;
        let side = grid.side();
        for unit in 0..grid.unit_count() {
            let mut placed = DigitSet::empty();
            for i in 0..side {
                if let Some(digit) = grid.value(grid.unit_position(unit, i)) {
                    placed.insert(digit);
                }
            }

            for digit in 1..=side as u8 {
                if placed.contains(digit) {
                    continue;
                }
                let mut home: Option<Position> = None;
                let mut count = 0;
                for i in 0..side {
                    let pos = grid.unit_position(unit, i);
                    if grid.value(pos).is_none() && grid.domain(pos).contains(digit) {
                        count += 1;
                        home = Some(pos);
                        if count > 1 {
                            break;
                        }
                    }
                }
                match (count, home) {
                    (0, _) => return Propagation::Contradiction,
                    (1, Some(pos)) => {
                        if !grid.place(pos, digit) {
                            return Propagation::Contradiction;
                        }
                        placed.insert(digit);
                        changed = true;
                    }
                    _ => {}
                }
            }
        }
        if changed {
            Propagation::Progress
        } else {
            Propagation::Stable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::EXAMPLE_FOUR;

    #[test]
    fn test_naked_singles_complete_board() {
        let mut grid = Grid::from_rows(&EXAMPLE_FOUR).unwrap();
        assert_eq!(Propagator::propagate(&mut grid), Propagation::Progress);
        assert!(grid.is_complete());
        assert!(grid.is_valid_solution());
        assert_eq!(grid.value(Position::new(1, 2)), Some(1));
        assert_eq!(grid.value(Position::new(3, 3)), Some(1));
    }

    #[test]
    fn test_stable_on_empty_grid() {
        let mut grid = Grid::empty(3);
        assert_eq!(Propagator::propagate(&mut grid), Propagation::Stable);
        assert_eq!(grid.clue_count(), 0);
    }

    #[test]
    fn test_hidden_single_in_row() {
        // Digit 1 is pushed out of every cell of row 0 except (0, 8):
        // the box of (1, 0) covers columns 0..3, the box of (2, 4) covers
        // columns 3..6, and the columns of (4, 6) and (7, 7) cover the
        // rest. (0, 8) keeps other candidates, so this is not a naked
        // single.
        let mut grid = Grid::empty(3);
        grid.set_clue(Position::new(1, 0), 1).unwrap();
        grid.set_clue(Position::new(2, 4), 1).unwrap();
        grid.set_clue(Position::new(4, 6), 1).unwrap();
        grid.set_clue(Position::new(7, 7), 1).unwrap();

        assert!(grid.domain(Position::new(0, 8)).len() > 1);
        assert_eq!(Propagator::propagate(&mut grid), Propagation::Progress);
        assert_eq!(grid.value(Position::new(0, 8)), Some(1));
    }

    #[test]
    fn test_contradiction_on_empty_domain() {
        // Row 0 holds 1, 2, 3 and the 4 in column 3 leaves (0, 3) with no
        // candidate at all.
        let mut grid = Grid::empty(2);
        grid.set_clue(Position::new(0, 0), 1).unwrap();
        grid.set_clue(Position::new(0, 1), 2).unwrap();
        grid.set_clue(Position::new(0, 2), 3).unwrap();
        grid.set_clue(Position::new(2, 3), 4).unwrap();

        assert_eq!(Propagator::propagate(&mut grid), Propagation::Contradiction);
    }

    #[test]
    fn test_contradiction_when_digit_loses_last_home() {
        // The 1s at (0, 0), (1, 2) and (2, 1) exclude digit 1 from
        // (3, 0), (3, 1) and (3, 2), and the 2 at (3, 3) takes the only
        // remaining cell: digit 1 has no home left in row 3, although
        // every open cell of that row still has candidates.
        let mut grid = Grid::empty(2);
        grid.set_clue(Position::new(0, 0), 1).unwrap();
        grid.set_clue(Position::new(1, 2), 1).unwrap();
        grid.set_clue(Position::new(2, 1), 1).unwrap();
        grid.set_clue(Position::new(3, 3), 2).unwrap();
        assert!(!grid.domain(Position::new(3, 0)).is_empty());

        assert_eq!(Propagator::propagate(&mut grid), Propagation::Contradiction);
    }
}
