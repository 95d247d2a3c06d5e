//! Puzzle generation.
//!
//! A puzzle is generated in two phases. First a complete random solution
//! is produced by running the randomized search on an empty grid. Then
//! cells are cleared one at a time, in a shuffled order, keeping a
//! removal only while the puzzle still has exactly one solution, until
//! the requested clue count is reached. If the shuffled position list is
//! exhausted first, the run reports [`GenerateError::InsufficientReduction`]
//! instead of silently returning a denser puzzle.
//!
//! All randomness flows from one explicit seed, so a seeded generator is
//! fully reproducible.

use crate::engine::digit_set::Digit;
use crate::engine::grid::{Grid, Position};
use crate::engine::search::Search;
use crate::engine::solver::Solver;
use log::{debug, trace};
use thiserror::Error;

/// What to generate: the board's box size and how many clues to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleSpec {
    /// Box side length; the board side is its square.
    pub box_size: usize,
    /// Number of clues the finished puzzle keeps.
    pub clue_count: usize,
}

impl PuzzleSpec {
    /// Creates a spec for a `box_size` board keeping `clue_count` clues.
    #[must_use]
    pub const fn new(box_size: usize, clue_count: usize) -> Self {
        Self {
            box_size,
            clue_count,
        }
    }

    /// A spec that keeps every cell: the "puzzle" is a full solved grid.
    #[must_use]
    pub const fn full(box_size: usize) -> Self {
        Self::new(box_size, box_size.pow(4))
    }
}

/// A generated puzzle together with its unique solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// The clue grid handed to a player.
    pub clues: Grid,
    /// The full solution the clues reduce to.
    pub solution: Grid,
}

/// Generation failures. Both are definitive verdicts about the request,
/// not transient conditions worth retrying with the same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The requested clue count exceeds the number of cells.
    #[error("clue target {target} exceeds the {cells} cells of a box-size-{box_size} board")]
    TargetOutOfRange {
        /// Requested box size.
        box_size: usize,
        /// Requested clue count.
        target: usize,
        /// Cells available on that board.
        cells: usize,
    },
    /// Every untried cell was considered and the puzzle could not be
    /// thinned to the target without losing uniqueness.
    #[error("could not reduce to {target} clues without losing uniqueness; stopped at {achieved}")]
    InsufficientReduction {
        /// Requested clue count.
        target: usize,
        /// Clue count the reduction actually reached.
        achieved: usize,
    },
}

/// Seeded puzzle generator.
#[derive(Debug, Clone)]
pub struct Generator {
    rng: fastrand::Rng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Creates a generator seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a generator with an explicit seed. Equal seeds produce
    /// identical puzzles.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Generates a puzzle for `spec` along with its unique solution.
    ///
    /// # Errors
    ///
    /// [`GenerateError::TargetOutOfRange`] if the clue target does not
    /// fit the board, [`GenerateError::InsufficientReduction`] if the
    /// target could not be reached for the solution this run produced.
    pub fn generate(&mut self, spec: &PuzzleSpec) -> Result<Puzzle, GenerateError> {
        let side = spec.box_size * spec.box_size;
        let cells = side * side;
        if spec.clue_count > cells {
            return Err(GenerateError::TargetOutOfRange {
                box_size: spec.box_size,
                target: spec.clue_count,
                cells,
            });
        }

        let solution = self.full_solution(spec.box_size);
        debug!("full {side}x{side} solution generated, reducing to {} clues", spec.clue_count);

        let mut rows: Vec<Vec<Digit>> = solution.to_rows();
        let mut positions: Vec<Position> = solution.positions().collect();
        self.rng.shuffle(&mut positions);

        let solver = Solver::new();
        let mut clues = cells;
        for pos in positions {
            if clues == spec.clue_count {
                break;
            }
            let removed = rows[pos.row][pos.col];
            rows[pos.row][pos.col] = 0;

            let candidate = Grid::from_rows(&rows)
                .expect("removing clues from a complete solution cannot introduce a conflict");
            if solver.has_unique_solution(&candidate) {
                clues -= 1;
                trace!("cleared r{}c{}, {clues} clues remain", pos.row, pos.col);
            } else {
                rows[pos.row][pos.col] = removed;
            }
        }

        if clues > spec.clue_count {
            debug!("reduction exhausted at {clues} clues, target was {}", spec.clue_count);
            return Err(GenerateError::InsufficientReduction {
                target: spec.clue_count,
                achieved: clues,
            });
        }

        let puzzle = Grid::from_rows(&rows)
            .expect("removing clues from a complete solution cannot introduce a conflict");
        Ok(Puzzle {
            clues: puzzle,
            solution,
        })
    }

    /// Produces one complete random solution by running the randomized
    /// search on an empty board.
    fn full_solution(&mut self, box_size: usize) -> Grid {
        let empty = Grid::empty(box_size);
        let mut search: Search = Search::seeded(self.rng.u64(..));
        search
            .first_solution(&empty)
            .expect("an empty board always has a complete solution")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_full_grid() {
        let mut generator = Generator::with_seed(42);
        let puzzle = generator.generate(&PuzzleSpec::full(3)).unwrap();

        assert_eq!(puzzle.clues.clue_count(), 81);
        assert!(puzzle.clues.is_valid_solution());
        assert_eq!(puzzle.clues, puzzle.solution);
        assert!(Solver::new().has_unique_solution(&puzzle.clues));
    }

    #[test]
    fn test_generate_exact_clue_count() {
        let mut generator = Generator::with_seed(42);
        let puzzle = generator.generate(&PuzzleSpec::new(3, 30)).unwrap();

        assert_eq!(puzzle.clues.clue_count(), 30);
        assert!(puzzle.solution.is_valid_solution());
        assert!(Solver::new().has_unique_solution(&puzzle.clues));
    }

    #[test]
    fn test_clues_agree_with_solution() {
        let mut generator = Generator::with_seed(7);
        let puzzle = generator.generate(&PuzzleSpec::new(2, 8)).unwrap();

        assert_eq!(puzzle.clues.clue_count(), 8);
        for pos in puzzle.clues.positions() {
            if let Some(digit) = puzzle.clues.value(pos) {
                assert_eq!(puzzle.solution.value(pos), Some(digit));
            }
        }
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let spec = PuzzleSpec::new(3, 32);
        let a = Generator::with_seed(123).generate(&spec).unwrap();
        let b = Generator::with_seed(123).generate(&spec).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let spec = PuzzleSpec::full(3);
        let a = Generator::with_seed(1).generate(&spec).unwrap();
        let b = Generator::with_seed(2).generate(&spec).unwrap();
        assert_ne!(a.solution, b.solution);
    }

    #[test]
    fn test_target_out_of_range() {
        let mut generator = Generator::with_seed(1);
        let err = generator.generate(&PuzzleSpec::new(3, 82)).unwrap_err();
        assert_eq!(
            err,
            GenerateError::TargetOutOfRange {
                box_size: 3,
                target: 82,
                cells: 81
            }
        );
    }

    #[test]
    fn test_unreachable_target_reports_insufficient_reduction() {
        // No board stays uniquely solvable with zero clues, so the
        // position list runs dry and the achieved count is reported.
        let mut generator = Generator::with_seed(5);
        let err = generator.generate(&PuzzleSpec::new(2, 0)).unwrap_err();
        match err {
            GenerateError::InsufficientReduction { target, achieved } => {
                assert_eq!(target, 0);
                assert!(achieved > 0);
            }
            other => panic!("expected InsufficientReduction, got {other:?}"),
        }
    }
}
