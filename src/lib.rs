//! Target-number puzzle generator.
//!
//! This crate draws six numbers and a target, then proves with a bounded
//! depth-first search that the target can be reached by repeatedly
//! combining two numbers with an arithmetic operation. Only puzzles with a
//! proven solution are handed out.

pub mod error;
pub mod generator;
pub mod operations;
pub mod puzzle;
pub mod random;
pub mod request;
pub mod solver;
pub mod store;
pub mod verify;

// Re-export main types
pub use error::{GenerationError, InvariantViolation, RequestError, ServiceError, StoreError};
pub use generator::{GeneratedPuzzle, GeneratorConfig, PuzzleGenerator, MAX_BATCH_SIZE, MIN_BATCH_SIZE};
pub use operations::valid_operations;
pub use puzzle::{
    Difficulty, Operation, OperationResult, Operator, PuzzleData, PuzzleStep, State, MAX_VALUE,
    MIN_VALUE, NUMBERS_PER_PUZZLE,
};
pub use request::{GenerationRequest, ValidatedRequest};
pub use solver::{find_solution, solve, SearchResult};
pub use store::{generate_and_store, JsonFileStore, MemoryStore, PuzzleStore, StoreReport};
pub use verify::{check_puzzle, verify_solution, SolutionMetrics, VerificationResult, VerificationStatus};
