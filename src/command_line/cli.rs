#![allow(clippy::cast_precision_loss)]
//! CLI definition and command implementations.

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use sudoku_solver::engine::budget::Budget;
use sudoku_solver::engine::grid::Grid;
use sudoku_solver::engine::search::SearchStats;
use sudoku_solver::engine::solver::{SolveResult, Solver};
use sudoku_solver::generator::{Generator, PuzzleSpec};
use sudoku_solver::text;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_solver", version, about = "An exact Sudoku solver and puzzle generator")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path of a puzzle file (or a directory of
    /// `.sudoku` files) to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `generate`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the sudoku solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle file, or every `.sudoku` file under a directory.
    Solve {
        /// Path to the puzzle file or directory. The accepted grid text is
        /// defined by `sudoku_solver::text::parse_grid`.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate puzzles with a unique solution.
    Generate {
        /// Box side length; the board side is its square (3 gives 9x9).
        #[arg(short, long, default_value_t = 3)]
        box_size: usize,

        /// Number of clues to keep. Prompted for on standard input when
        /// omitted.
        #[arg(short, long)]
        clues: Option<usize>,

        /// Seed for reproducible output. Seeded from entropy when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// How many puzzles to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable verification of solved grids against the Sudoku rules.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Abort a solve once this many search nodes have been expanded.
    #[arg(long)]
    pub(crate) max_nodes: Option<u64>,

    /// Abort a solve after this many milliseconds.
    #[arg(long)]
    pub(crate) timeout_ms: Option<u64>,
}

impl CommonOptions {
    /// The search budget these options describe.
    fn budget(&self) -> Budget {
        let mut budget = Budget::unlimited();
        if let Some(max_nodes) = self.max_nodes {
            budget = budget.with_node_limit(max_nodes);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            budget = budget.with_deadline(Duration::from_millis(timeout_ms));
        }
        budget
    }
}

/// Prints completion definitions for `shell` to standard output.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "sudoku_solver", &mut io::stdout());
}

/// Solves the puzzle file at `path`, or every `.sudoku` file under it if
/// it is a directory.
///
/// # Errors
///
/// If the path does not exist or a puzzle fails to parse.
pub(crate) fn solve_path(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if path.is_dir() {
        solve_dir(path, common)
    } else {
        solve_file(path, common)
    }
}

/// Solves every `.sudoku` file in a directory tree.
fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }
        solve_file(&file_path, common)?;
    }
    Ok(())
}

/// Parses and solves a single puzzle file, reporting the outcome, optional
/// verification and statistics.
fn solve_file(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    println!("Solving: {}", path.display());

    let time = Instant::now();
    let grid = text::parse_grid_file(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    println!("Parsed puzzle:\n{grid}");

    let solver = Solver::with_budget(common.budget());
    let time = Instant::now();
    let (result, search_stats) = solver.solve_with_stats(&grid);
    let elapsed = time.elapsed();

    let (allocated_mib, resident_mib) = memory_mib();

    match &result {
        SolveResult::Unique(solution) => {
            if common.verify {
                let ok = solution.is_valid_solution();
                println!("Verified: {ok:?}");
                assert!(ok, "Solution failed verification!");
            }
            println!("Solution:\n{solution}");
        }
        SolveResult::Multiple => println!("Multiple solutions exist; the puzzle is not proper."),
        SolveResult::Infeasible => println!("No solution exists."),
        SolveResult::Timeout => println!("Search budget exceeded before a verdict was reached."),
    }

    if common.stats {
        print_stats(parse_time, elapsed, &grid, &search_stats, allocated_mib, resident_mib);
    }

    Ok(())
}

/// Generates `count` puzzles and prints each with its solution.
///
/// Mirrors the interactive flow of asking for the clue count when it was
/// not given on the command line.
///
/// # Errors
///
/// If the clue count cannot be read or generation fails.
pub(crate) fn generate_puzzles(
    box_size: usize,
    clues: Option<usize>,
    seed: Option<u64>,
    count: usize,
    common: &CommonOptions,
) -> Result<(), String> {
    let clue_count = match clues {
        Some(n) => n,
        None => read_clue_count()?,
    };
    let spec = PuzzleSpec::new(box_size, clue_count);

    let mut generator = seed.map_or_else(Generator::new, Generator::with_seed);

    for i in 0..count {
        let time = Instant::now();
        let puzzle = generator.generate(&spec).map_err(|e| e.to_string())?;
        let elapsed = time.elapsed();

        if count > 1 {
            println!("Puzzle {} of {count}:", i + 1);
        } else {
            println!("Puzzle:");
        }
        println!("{}", puzzle.clues);

        if common.verify {
            let ok = puzzle.solution.is_valid_solution()
                && Solver::new().has_unique_solution(&puzzle.clues);
            println!("Verified: {ok:?}");
            assert!(ok, "Generated puzzle failed verification!");
        }

        println!("Solution:\n{}", puzzle.solution);

        if common.stats {
            let (allocated_mib, resident_mib) = memory_mib();
            println!("\n======================[ Generation Statistics ]======================");
            stat_line("Clues kept", puzzle.clues.clue_count());
            stat_line("Open cells", puzzle.clues.cell_count() - puzzle.clues.clue_count());
            stat_line("Memory usage (MiB)", format!("{allocated_mib:.2}"));
            stat_line("Resident memory (MiB)", format!("{resident_mib:.2}"));
            stat_line("CPU time (s)", format!("{:.3}", elapsed.as_secs_f64()));
            println!("=====================================================================");
        }
    }

    Ok(())
}

/// Reads the requested clue count from standard input.
fn read_clue_count() -> Result<usize, String> {
    print!("Number of clues to keep: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| e.to_string())?;
    line.trim()
        .parse()
        .map_err(|_| format!("not a clue count: {:?}", line.trim()))
}

/// Reads current allocation numbers from jemalloc, in MiB.
fn memory_mib() -> (f64, f64) {
    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    (
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    )
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    grid: &Grid,
    s: &SearchStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Board side", grid.side());
    stat_line("Clues", grid.clue_count());
    stat_line("Open cells", grid.cell_count() - grid.clue_count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Nodes", s.nodes, elapsed_secs);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Contradictions", s.contradictions, elapsed_secs);
    stat_line("Solutions found", s.solutions);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
