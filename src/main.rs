//! # sudoku_solver
//!
//! `sudoku_solver` is a command-line Sudoku solver and puzzle generator.
//! Solving is exact: a puzzle is classified as uniquely solvable,
//! ambiguous (more than one solution) or infeasible, never just
//! "feasible". Generation runs the same engine in reverse, thinning a
//! random full solution while a uniqueness check keeps the puzzle
//! proper.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle file (81-character line or one row per line)
//! sudoku_solver puzzle.sudoku
//!
//! # Solve every .sudoku file under a directory
//! sudoku_solver solve --path puzzles/
//!
//! # Generate a 9x9 puzzle with 30 clues, reproducibly
//! sudoku_solver generate --clues 30 --seed 42
//!
//! # Generate and be prompted for the clue count on stdin
//! sudoku_solver generate
//! ```
//!
//! ### Common Options
//!
//! -   `-v, --verify`: Check solved grids against the Sudoku rules
//!     (default: `true`).
//! -   `-s, --stats`: Print search statistics and memory usage
//!     (default: `true`).
//! -   `--max-nodes <N>` / `--timeout-ms <MS>`: Bound the search; an
//!     exhausted budget is reported distinctly from infeasibility.
//!
//! Diagnostics are logged via `env_logger`; set `RUST_LOG=debug` (or
//! `trace`) to watch generation thin a puzzle cell by cell.
//!
//! This file contains the entry point; CLI parsing and the command
//! implementations live in the `command_line` module.

use clap::Parser;
use command_line::cli;
use command_line::cli::{Cli, Commands};

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the sudoku solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a
    // subcommand. This defaults to solving that file or directory.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            exit_on_error(cli::solve_path(&path, &cli.common));
            return;
        }
    }

    match cli.command {
        Some(Commands::Solve { path, common }) => {
            exit_on_error(cli::solve_path(&path, &common));
        }
        Some(Commands::Generate {
            box_size,
            clues,
            seed,
            count,
            common,
        }) => {
            exit_on_error(cli::generate_puzzles(box_size, clues, seed, count, &common));
        }
        Some(Commands::Completions { shell }) => {
            cli::print_completions(shell);
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Reports a command failure and exits with a non-zero status.
fn exit_on_error(result: Result<(), String>) {
    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
