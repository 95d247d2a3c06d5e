#![deny(missing_docs)]
//! This crate provides exact Sudoku solving and puzzle generation, built on
//! constraint propagation and backtracking search.


/// The `engine` module implements the solver core: grids, candidate domains,
/// propagation, search and the solving facade.
pub mod engine;

/// The `generator` module produces puzzles with a unique solution from an
/// explicit seed.
pub mod generator;

/// The `text` module parses and renders textual grid representations.
pub mod text;
