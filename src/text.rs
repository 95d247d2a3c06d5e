#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for textual Sudoku grids.
//!
//! Two shapes are accepted:
//!
//! - A single line of cell characters, e.g. the common 81-character form
//!   for 9x9 puzzles, with `0`, `.` or `_` marking an empty cell.
//! - One row per line, either as contiguous cell characters or as
//!   whitespace-separated numbers (required for boards with sides above
//!   9, where a cell no longer fits one character).
//!
//! Blank lines and lines starting with `#` are skipped. The board size is
//! inferred from the cell count and must be `n^4` cells for a box size
//! `n` in `2..=5`.
//!
//! All failures are ordinary [`ParseError`] values; malformed input never
//! panics.

use crate::engine::digit_set::Digit;
use crate::engine::grid::{ConflictError, Grid, Position};
use itertools::Itertools;
use std::path::Path;
use thiserror::Error;

/// Why a textual grid was rejected.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The cell count fits no supported board.
    #[error("grid has {cells} cells, not a supported board size (need n^4 cells for box size n in 2..=5)")]
    UnsupportedSize {
        /// Number of cells found in the input.
        cells: usize,
    },
    /// A row's length disagrees with the row count.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        /// Zero-based row index.
        row: usize,
        /// Expected cells per row.
        expected: usize,
        /// Cells actually present.
        found: usize,
    },
    /// A cell character is neither a digit nor an empty-cell marker.
    #[error("invalid character {character:?} in grid text")]
    BadCharacter {
        /// The offending character.
        character: char,
    },
    /// A whitespace-separated cell token is not a number or marker.
    #[error("invalid cell token {token:?}")]
    BadToken {
        /// The offending token.
        token: String,
    },
    /// A clue value does not fit the inferred board.
    #[error("digit {digit} at row {row}, column {col} exceeds the board side {side}")]
    DigitOutOfRange {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The offending value.
        digit: usize,
        /// The inferred board side.
        side: usize,
    },
    /// Two clues contradict each other.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    /// The grid file could not be read.
    #[error("could not read grid file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a textual grid.
///
/// # Errors
///
/// Any [`ParseError`] variant except [`ParseError::Io`].
pub fn parse_grid(input: &str) -> Result<Grid, ParseError> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        rows.push(parse_row(line)?);
    }

    let cells: Vec<usize> = if rows.len() == 1 {
        rows.remove(0)
    } else {
        let side = rows.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != side {
                return Err(ParseError::RowLength {
                    row,
                    expected: side,
                    found: cells.len(),
                });
            }
        }
        rows.concat()
    };

    let side = cells.len().isqrt();
    let box_size = side.isqrt();
    if side * side != cells.len() || box_size * box_size != side || !(2..=5).contains(&box_size) {
        return Err(ParseError::UnsupportedSize { cells: cells.len() });
    }

    let mut grid = Grid::empty(box_size);
    for (i, &value) in cells.iter().enumerate() {
        if value == 0 {
            continue;
        }
        let (row, col) = (i / side, i % side);
        if value > side {
            return Err(ParseError::DigitOutOfRange {
                row,
                col,
                digit: value,
                side,
            });
        }
        grid.set_clue(Position::new(row, col), value as Digit)?;
    }
    Ok(grid)
}

/// Parses the grid file at `path`.
///
/// # Errors
///
/// [`ParseError::Io`] if the file cannot be read, otherwise as
/// [`parse_grid`].
pub fn parse_grid_file<P: AsRef<Path>>(path: P) -> Result<Grid, ParseError> {
    let input = std::fs::read_to_string(path)?;
    parse_grid(&input)
}

/// Renders a grid on one line: cell characters for sides up to 9,
/// whitespace-separated numbers above that, `.` for empty cells.
#[must_use]
pub fn render_line(grid: &Grid) -> String {
    let mut cells = grid
        .positions()
        .map(|pos| grid.value(pos).map_or_else(|| ".".to_string(), |d| d.to_string()));
    if grid.side() > 9 {
        cells.join(" ")
    } else {
        cells.collect()
    }
}

fn parse_row(line: &str) -> Result<Vec<usize>, ParseError> {
    if line.contains(char::is_whitespace) {
        line.split_whitespace().map(parse_token).collect()
    } else {
        line.chars().map(parse_char).collect()
    }
}

fn parse_token(token: &str) -> Result<usize, ParseError> {
    match token {
        "." | "_" => Ok(0),
        _ => token.parse().map_err(|_| ParseError::BadToken {
            token: token.to_string(),
        }),
    }
}

fn parse_char(character: char) -> Result<usize, ParseError> {
    match character {
        '.' | '_' => Ok(0),
        _ => character
            .to_digit(10)
            .map(|d| d as usize)
            .ok_or(ParseError::BadCharacter { character }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::EXAMPLE_NINE;

    const EXAMPLE_NINE_LINE: &str =
        "000000010400000000020000000000050407008000300001090000300400200050100000000806000";

    #[test]
    fn test_parse_single_line() {
        let grid = parse_grid(EXAMPLE_NINE_LINE).unwrap();
        assert_eq!(grid, Grid::from_rows(&EXAMPLE_NINE).unwrap());
    }

    #[test]
    fn test_parse_rows_with_dots_and_comments() {
        let input = "# a 4x4 puzzle\n12.4\n3.12\n..41\n4.2.\n";
        let grid = parse_grid(input).unwrap();
        assert_eq!(grid.side(), 4);
        assert_eq!(grid.value(Position::new(0, 0)), Some(1));
        assert_eq!(grid.value(Position::new(0, 2)), None);
        assert_eq!(grid.value(Position::new(3, 0)), Some(4));
    }

    #[test]
    fn test_parse_whitespace_tokens() {
        let input = "1 2 . 4\n3 . 1 2\n. . 4 1\n4 . 2 .\n";
        let grid = parse_grid(input).unwrap();
        assert_eq!(grid.side(), 4);
        assert_eq!(grid.value(Position::new(1, 2)), Some(1));
    }

    #[test]
    fn test_parse_bad_character() {
        let err = parse_grid("12x4\n3412\n2143\n4321").unwrap_err();
        assert!(matches!(err, ParseError::BadCharacter { character: 'x' }));
    }

    #[test]
    fn test_parse_unsupported_size() {
        let err = parse_grid("12345").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedSize { cells: 5 }));
    }

    #[test]
    fn test_parse_row_length_mismatch() {
        let err = parse_grid("1234\n123\n1234\n1234").unwrap_err();
        assert!(matches!(
            err,
            ParseError::RowLength {
                row: 1,
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_parse_digit_out_of_range() {
        let err = parse_grid("5...\n....\n....\n....").unwrap_err();
        assert!(matches!(
            err,
            ParseError::DigitOutOfRange {
                row: 0,
                col: 0,
                digit: 5,
                side: 4
            }
        ));
    }

    #[test]
    fn test_parse_conflicting_clues() {
        let err = parse_grid("11..\n....\n....\n....").unwrap_err();
        assert!(matches!(err, ParseError::Conflict(_)));
    }

    #[test]
    fn test_render_line_round_trip() {
        let grid = Grid::from_rows(&EXAMPLE_NINE).unwrap();
        let line = render_line(&grid);
        assert_eq!(line.len(), 81);
        assert_eq!(parse_grid(&line).unwrap(), grid);
    }
}
