#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Board state: cell values and candidate domains.
//!
//! A [`Grid`] holds an `N x N` board with `N = box_size^2`. Every cell
//! carries its assigned digit (or 0 for empty) and the [`DigitSet`] of
//! digits still possible there. Grids can only be built empty or through
//! checked clue placement, so a grid handed to the search is always
//! pairwise-consistent along rows, columns and boxes.

use crate::engine::digit_set::{Digit, DigitSet};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// A cell coordinate, `(row, col)` with both in `0..side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index, `0..side`.
    pub row: usize,
    /// Column index, `0..side`.
    pub col: usize,
}

impl Position {
    /// Creates a position from row and column indices.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A clue placement that contradicts an already placed peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("digit {digit} is excluded at row {row}, column {col} by a placed peer")]
pub struct ConflictError {
    /// Row of the rejected placement.
    pub row: usize,
    /// Column of the rejected placement.
    pub col: usize,
    /// The digit that could not be placed.
    pub digit: Digit,
}

/// An `N x N` Sudoku board with per-cell candidate domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    box_size: usize,
    side: usize,
    values: Vec<Digit>,
    domains: Vec<DigitSet>,
}

/// The worked 9x9 puzzle used by tests and benchmarks; 17 clues, one
/// solution.
pub const EXAMPLE_NINE: [[Digit; 9]; 9] = [
    [0, 0, 0, 0, 0, 0, 0, 1, 0],
    [4, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 5, 0, 4, 0, 7],
    [0, 0, 8, 0, 0, 0, 3, 0, 0],
    [0, 0, 1, 0, 9, 0, 0, 0, 0],
    [3, 0, 0, 4, 0, 0, 2, 0, 0],
    [0, 5, 0, 1, 0, 0, 0, 0, 0],
    [0, 0, 0, 8, 0, 6, 0, 0, 0],
];

/// A 4x4 board solvable with naked singles alone.
pub const EXAMPLE_FOUR: [[Digit; 4]; 4] = [
    [1, 2, 3, 4],
    [3, 4, 0, 2],
    [2, 1, 4, 3],
    [4, 3, 2, 0],
];

impl Grid {
    /// Creates an empty grid for the given box size.
    ///
    /// # Panics
    ///
    /// If `box_size` is outside `2..=5`; a box size of 5 already gives the
    /// largest side (25) a [`DigitSet`] can represent.
    #[must_use]
    pub fn empty(box_size: usize) -> Self {
        assert!(
            (2..=5).contains(&box_size),
            "box size {box_size} is outside the supported range 2..=5"
        );
        let side = box_size * box_size;
        Self {
            box_size,
            side,
            values: vec![0; side * side],
            domains: vec![DigitSet::full(side); side * side],
        }
    }

    /// Builds a grid from row-major cell values, 0 meaning empty.
    ///
    /// # Errors
    ///
    /// [`ConflictError`] if two clues contradict each other.
    ///
    /// # Panics
    ///
    /// If the rows do not form a square board of a supported size or a
    /// value exceeds the side length. Textual input is validated by
    /// [`crate::text::parse_grid`] before it reaches this constructor.
    pub fn from_rows<R: AsRef<[Digit]>>(rows: &[R]) -> Result<Self, ConflictError> {
        let side = rows.len();
        let box_size = side.isqrt();
        assert_eq!(box_size * box_size, side, "side {side} is not a square of a box size");

        let mut grid = Self::empty(box_size);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            assert_eq!(cells.len(), side, "row {row} has {} cells, expected {side}", cells.len());
            for (col, &digit) in cells.iter().enumerate() {
                if digit == 0 {
                    continue;
                }
                assert!(
                    digit as usize <= side,
                    "digit {digit} at row {row}, column {col} exceeds side {side}"
                );
                grid.set_clue(Position::new(row, col), digit)?;
            }
        }
        Ok(grid)
    }

    /// The box (sub-grid) side length.
    #[must_use]
    pub const fn box_size(&self) -> usize {
        self.box_size
    }

    /// The board side length, `box_size^2`.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells, `side^2`.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.side * self.side
    }

    const fn index(&self, pos: Position) -> usize {
        pos.row * self.side + pos.col
    }

    /// The assigned digit at `pos`, if any.
    #[must_use]
    pub fn value(&self, pos: Position) -> Option<Digit> {
        match self.values[self.index(pos)] {
            0 => None,
            digit => Some(digit),
        }
    }

    /// The candidate domain at `pos`. A singleton for assigned cells.
    #[must_use]
    pub fn domain(&self, pos: Position) -> DigitSet {
        self.domains[self.index(pos)]
    }

    /// Places a clue, rejecting digits a placed peer has already excluded.
    ///
    /// # Errors
    ///
    /// [`ConflictError`] if `digit` is no longer in the cell's domain.
    pub fn set_clue(&mut self, pos: Position, digit: Digit) -> Result<(), ConflictError> {
        if !self.domain(pos).contains(digit) {
            return Err(ConflictError {
                row: pos.row,
                col: pos.col,
                digit,
            });
        }
        self.place(pos, digit);
        Ok(())
    }

    /// Assigns `digit` at `pos` and eliminates it from every peer domain.
    ///
    /// Returns `false` if some peer domain became empty, which dooms the
    /// current branch. The caller must have checked `digit` against the
    /// cell's own domain.
    pub(crate) fn place(&mut self, pos: Position, digit: Digit) -> bool {
        let idx = self.index(pos);
        self.values[idx] = digit;
        self.domains[idx] = DigitSet::singleton(digit);

        let mut consistent = true;
        for peer in self.peers(pos) {
            let peer_idx = self.index(peer);
            if self.values[peer_idx] != 0 {
                continue;
            }
            self.domains[peer_idx].remove(digit);
            if self.domains[peer_idx].is_empty() {
                consistent = false;
            }
        }
        consistent
    }

    /// Whether every cell has an assigned digit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|&v| v != 0)
    }

    /// Number of assigned cells.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0).count()
    }

    /// Whether the grid is complete and every row, column and box contains
    /// each digit exactly once.
    #[must_use]
    pub fn is_valid_solution(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        let full = DigitSet::full(self.side);
        for unit in 0..self.unit_count() {
            let mut seen = DigitSet::empty();
            for i in 0..self.side {
                let pos = self.unit_position(unit, i);
                let digit = self.values[self.index(pos)];
                if seen.contains(digit) {
                    return false;
                }
                seen.insert(digit);
            }
            if seen != full {
                return false;
            }
        }
        true
    }

    /// Iterates all cell positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let side = self.side;
        (0..side).flat_map(move |row| (0..side).map(move |col| Position::new(row, col)))
    }

    /// Number of units: `side` rows, `side` columns, `side` boxes.
    pub(crate) const fn unit_count(&self) -> usize {
        3 * self.side
    }

    /// The `i`-th position of the `unit`-th unit. Units are ordered rows,
    /// then columns, then boxes.
    pub(crate) const fn unit_position(&self, unit: usize, i: usize) -> Position {
        let side = self.side;
        let bs = self.box_size;
        match unit / side {
            0 => Position::new(unit % side, i),
            1 => Position::new(i, unit % side),
            _ => {
                let b = unit % side;
                Position::new((b / bs) * bs + i / bs, (b % bs) * bs + i % bs)
            }
        }
    }

    /// Iterates the peers of `pos`: the other cells of its row, column and
    /// box, each exactly once.
    pub(crate) fn peers(&self, pos: Position) -> impl Iterator<Item = Position> + use<> {
        let side = self.side;
        let bs = self.box_size;
        let row_peers = (0..side)
            .filter(move |&c| c != pos.col)
            .map(move |c| Position::new(pos.row, c));
        let col_peers = (0..side)
            .filter(move |&r| r != pos.row)
            .map(move |r| Position::new(r, pos.col));
        let box_row = (pos.row / bs) * bs;
        let box_col = (pos.col / bs) * bs;
        let box_peers = (0..side)
            .map(move |i| Position::new(box_row + i / bs, box_col + i % bs))
            .filter(move |p| p.row != pos.row && p.col != pos.col);
        row_peers.chain(col_peers).chain(box_peers)
    }

    /// The grid's cell values as row-major rows, 0 meaning empty.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Digit>> {
        self.values.chunks(self.side).map(<[Digit]>::to_vec).collect()
    }
}

impl From<&Grid> for Vec<Vec<Digit>> {
    fn from(grid: &Grid) -> Self {
        grid.to_rows()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = if self.side > 9 { 2 } else { 1 };
        for row in 0..self.side {
            for col in 0..self.side {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.value(Position::new(row, col)) {
                    Some(digit) => write!(f, "{digit:>width$}")?,
                    None => write!(f, "{:>width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty(3);
        assert_eq!(grid.side(), 9);
        assert_eq!(grid.cell_count(), 81);
        assert_eq!(grid.clue_count(), 0);
        assert!(!grid.is_complete());
        assert_eq!(grid.domain(Position::new(4, 4)), DigitSet::full(9));
    }

    #[test]
    fn test_set_clue_narrows_peers() {
        let mut grid = Grid::empty(3);
        grid.set_clue(Position::new(0, 0), 5).unwrap();

        assert_eq!(grid.value(Position::new(0, 0)), Some(5));
        assert!(!grid.domain(Position::new(0, 8)).contains(5)); // row peer
        assert!(!grid.domain(Position::new(8, 0)).contains(5)); // column peer
        assert!(!grid.domain(Position::new(2, 2)).contains(5)); // box peer
        assert!(grid.domain(Position::new(3, 3)).contains(5)); // unrelated
    }

    #[test]
    fn test_set_clue_conflict() {
        let mut grid = Grid::empty(3);
        grid.set_clue(Position::new(0, 0), 5).unwrap();
        let err = grid.set_clue(Position::new(0, 7), 5).unwrap_err();
        assert_eq!(err, ConflictError { row: 0, col: 7, digit: 5 });
    }

    #[test]
    fn test_from_rows_conflict() {
        let rows = vec![
            vec![1, 0, 0, 1],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ];
        assert!(Grid::from_rows(&rows).is_err());
    }

    #[test]
    fn test_peers_count() {
        let grid = Grid::empty(3);
        // 8 row + 8 column + 4 box peers not sharing a row or column
        assert_eq!(grid.peers(Position::new(4, 4)).count(), 20);
        let grid = Grid::empty(2);
        assert_eq!(grid.peers(Position::new(0, 0)).count(), 7);
    }

    #[test]
    fn test_unit_positions_cover_board() {
        let grid = Grid::empty(2);
        for unit in 0..grid.unit_count() {
            let positions: Vec<Position> = (0..grid.side()).map(|i| grid.unit_position(unit, i)).collect();
            assert_eq!(positions.len(), 4);
            // all positions of a unit are pairwise distinct
            for (a, &pa) in positions.iter().enumerate() {
                for &pb in &positions[a + 1..] {
                    assert_ne!(pa, pb);
                }
            }
        }
    }

    #[test]
    fn test_is_valid_solution() {
        let solved = [
            [1, 2, 3, 4],
            [3, 4, 1, 2],
            [2, 1, 4, 3],
            [4, 3, 2, 1],
        ];
        let grid = Grid::from_rows(&solved).unwrap();
        assert!(grid.is_complete());
        assert!(grid.is_valid_solution());

        let partial = Grid::from_rows(&EXAMPLE_FOUR).unwrap();
        assert!(!partial.is_valid_solution());
    }

    #[test]
    fn test_example_nine_clue_count() {
        let grid = Grid::from_rows(&EXAMPLE_NINE).unwrap();
        assert_eq!(grid.clue_count(), 17);
    }

    #[test]
    fn test_display_empty_cells_as_dots() {
        let grid = Grid::from_rows(&EXAMPLE_FOUR).unwrap();
        let text = grid.to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().nth(1).unwrap().contains('.'));
    }
}
