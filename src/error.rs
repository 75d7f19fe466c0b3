use thiserror::Error;

use crate::puzzle::Difficulty;

/// Errors that can occur while generating puzzles
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid generator configuration: {0}")]
    InvalidConfiguration(String),
    #[error("No reachable puzzle found for difficulty {difficulty} after {attempts} attempts")]
    PuzzleUnreachable {
        difficulty: Difficulty,
        attempts: usize,
    },
}

/// Errors in a generation request, reported before any search work
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Difficulty must be between 1 and 4 (got {0})")]
    InvalidDifficulty(i64),
    #[error("Number of puzzles must be between 1 and 20 (got {0})")]
    InvalidPuzzleCount(i64),
    #[error("Malformed request: {0}")]
    Malformed(String),
}

/// Errors raised by a puzzle store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Commit rejected: {0}")]
    Rejected(String),
}

/// Errors from the generate-then-store flow
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),
    #[error("Failed to generate the requested number of puzzles: {0}")]
    Generation(#[from] GenerationError),
    #[error("Generated {generated} puzzles but failed to store them: {source}")]
    Persistence {
        generated: usize,
        #[source]
        source: StoreError,
    },
}

/// A structural rule broken by a puzzle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("expected {expected} initial numbers, found {found}")]
    WrongCount { expected: usize, found: usize },
    #[error("initial number {0} appears more than once")]
    DuplicateNumber(u32),
    #[error("initial number {number} is outside {min}..={max}")]
    NumberOutOfRange { number: u32, min: u32, max: u32 },
    #[error("target {0} is outside 1..=99")]
    TargetOutOfRange(u32),
    #[error("target {0} is one of the initial numbers")]
    TargetInNumbers(u32),
}
