//! CLI entry point for the puzzle generator.
//!
//! Usage:
//!   target-puzzle generate [--difficulty <1-4>] [--count <1-20>] [options]
//!   target-puzzle verify <puzzle.json>
//!   target-puzzle verify --stdin
//!
//! Options:
//!   --seed <n>            Seed for reproducible output
//!   --output <file>       Append the batch to a JSON puzzle store
//!   --show-solution       Include the solution found for each puzzle
//!   --max-attempts <n>    Attempts per puzzle before giving up (default: 100)
//!   --log-level <level>   error, warn, info, debug or trace (default: warn)

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::{Deserialize, Serialize};

use target_puzzle::{
    check_puzzle, generate_and_store, solve, verify_solution, GenerationRequest, GeneratorConfig,
    JsonFileStore, PuzzleData, PuzzleGenerator, PuzzleStep,
};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "target-puzzle")]
#[command(about = "Generate and verify arithmetic target-number puzzles")]
#[command(version)]
struct Cli {
    /// Log level
    #[arg(short, long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of puzzles with proven solutions
    Generate {
        /// Difficulty tier (1-4)
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        difficulty: i64,

        /// Number of puzzles to generate (1-20)
        #[arg(short = 'n', long, default_value = "1", allow_negative_numbers = true)]
        count: i64,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Append the batch to this JSON puzzle store instead of printing it
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the solution found for each puzzle
        #[arg(long, conflicts_with = "output")]
        show_solution: bool,

        /// Attempts per puzzle before giving up
        #[arg(long, default_value = "100")]
        max_attempts: usize,
    },
    /// Check that a puzzle is well formed and solvable
    Verify {
        /// Path to puzzle JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of file
        #[arg(long)]
        stdin: bool,
    },
}

/// A generated puzzle as printed by `generate`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PuzzleOutput {
    #[serde(flatten)]
    puzzle: PuzzleData,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Vec<StepOutput>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepOutput {
    operation: String,
    numbers: Vec<u32>,
}

/// Output format for verification result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerificationOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    states_explored: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Vec<StepOutput>>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level.to_level_filter())
        .init();

    match cli.command {
        Commands::Generate {
            difficulty,
            count,
            seed,
            output,
            show_solution,
            max_attempts,
        } => {
            let request = GenerationRequest::new(difficulty, count);
            let mut generator = PuzzleGenerator::new(GeneratorConfig {
                max_attempts,
                seed,
                ..GeneratorConfig::default()
            });

            if let Some(path) = output {
                let mut store = JsonFileStore::new(path);
                let report = generate_and_store(&mut generator, &request, &mut store)?;
                println!("{}", report.message());
                return Ok(ExitCode::SUCCESS);
            }

            let request = request.validate()?;
            info!(
                "Generating {} puzzles at difficulty {}",
                request.number_of_puzzles, request.difficulty
            );
            let mut outputs = Vec::with_capacity(request.number_of_puzzles);
            for _ in 0..request.number_of_puzzles {
                let generated = generator.generate(request.difficulty)?;
                outputs.push(PuzzleOutput {
                    puzzle: generated.puzzle,
                    solution: show_solution.then(|| format_steps(&generated.solution)),
                });
            }
            println!("{}", serde_json::to_string_pretty(&outputs)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { file, stdin } => {
            let json_content = if stdin {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read from stdin")?;
                buffer
            } else if let Some(path) = file {
                fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read file {}", path.display()))?
            } else {
                bail!("Must provide either a file path or --stdin");
            };

            let puzzle: PuzzleData =
                serde_json::from_str(&json_content).context("Error parsing puzzle JSON")?;

            let output = verify_puzzle(&puzzle);
            println!("{}", serde_json::to_string_pretty(&output)?);

            Ok(if output.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn verify_puzzle(puzzle: &PuzzleData) -> VerificationOutput {
    if let Err(violation) = check_puzzle(puzzle) {
        return VerificationOutput {
            valid: false,
            reason: Some(violation.to_string()),
            states_explored: 0,
            solution: None,
        };
    }

    let result = solve(puzzle);
    let solved = result.found && verify_solution(puzzle, &result.path).solved;
    VerificationOutput {
        valid: solved,
        reason: (!solved).then(|| {
            format!(
                "target unreachable within {} steps",
                puzzle.difficulty.max_depth()
            )
        }),
        states_explored: result.states_explored,
        solution: solved.then(|| format_steps(&result.path)),
    }
}

fn format_steps(steps: &[PuzzleStep]) -> Vec<StepOutput> {
    steps
        .iter()
        .map(|step| StepOutput {
            operation: step.operation.to_string(),
            numbers: step.state.values().to_vec(),
        })
        .collect()
}
