//! Puzzle assembly: draw numbers and a target, prove the target reachable,
//! retry on failure.
//!
//! Retries are a plain loop with a global attempt counter. Attempts are
//! grouped in rounds only for logging; once `max_attempts` draws have failed
//! the generator gives up with [`GenerationError::PuzzleUnreachable`].

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::puzzle::{Difficulty, PuzzleData, PuzzleStep, State, NUMBERS_PER_PUZZLE};
use crate::random::{random_numbers, random_target};
use crate::solver::find_solution;

/// Smallest batch that may be requested
pub const MIN_BATCH_SIZE: usize = 1;
/// Largest batch that may be requested
pub const MAX_BATCH_SIZE: usize = 20;

/// Configuration for the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// How many initial numbers each puzzle gets
    pub numbers_per_puzzle: usize,
    /// Failed attempts between "trying again" log messages
    pub attempts_per_round: usize,
    /// Total attempts per puzzle before giving up
    pub max_attempts: usize,
    /// Random seed for reproducibility (None for random)
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            numbers_per_puzzle: NUMBERS_PER_PUZZLE,
            attempts_per_round: 10,
            max_attempts: 100,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.numbers_per_puzzle == 0 {
            return Err(GenerationError::InvalidConfiguration(
                "numbers_per_puzzle must be at least 1".to_string(),
            ));
        }
        if self.attempts_per_round == 0 || self.max_attempts == 0 {
            return Err(GenerationError::InvalidConfiguration(
                "attempt limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A puzzle together with the solution that proved it reachable
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub puzzle: PuzzleData,
    pub solution: Vec<PuzzleStep>,
    /// Attempts used, including the successful one
    pub attempts: usize,
}

/// Puzzle generator owning its random source
pub struct PuzzleGenerator<R = ChaCha8Rng> {
    config: GeneratorConfig,
    rng: R,
}

impl PuzzleGenerator<ChaCha8Rng> {
    /// Create a generator seeded from `config.seed`, or from the thread RNG
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self { config, rng }
    }
}

impl Default for PuzzleGenerator<ChaCha8Rng> {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl<R: Rng> PuzzleGenerator<R> {
    /// Create a generator drawing from the given random source.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one puzzle along with its solution
    pub fn generate(&mut self, difficulty: Difficulty) -> Result<GeneratedPuzzle, GenerationError> {
        self.config.validate()?;
        let max_depth = difficulty.max_depth();

        for attempt in 1..=self.config.max_attempts {
            let numbers = random_numbers(&mut self.rng, self.config.numbers_per_puzzle, difficulty)?;
            let target = random_target(&mut self.rng, &numbers)?;

            let state = State::new(numbers.iter().copied());
            let result = find_solution(&state, target, difficulty, 0, max_depth);

            if result.found {
                debug!("Operations to get to target {target} from {state}:");
                for step in &result.path {
                    debug!("  {} -> {}", step.operation, step.state);
                }
                return Ok(GeneratedPuzzle {
                    puzzle: PuzzleData {
                        initial_numbers: numbers,
                        target_number: target,
                        difficulty,
                    },
                    solution: result.path,
                    attempts: attempt,
                });
            }

            debug!(
                "Target {target} unreachable from {state} within {max_depth} steps ({} states explored)",
                result.states_explored
            );
            if attempt % self.config.attempts_per_round == 0 && attempt < self.config.max_attempts {
                info!(
                    "Unable to find a valid puzzle after {} attempts, trying again...",
                    self.config.attempts_per_round
                );
            }
        }

        warn!(
            "Giving up on difficulty {difficulty} after {} attempts",
            self.config.max_attempts
        );
        Err(GenerationError::PuzzleUnreachable {
            difficulty,
            attempts: self.config.max_attempts,
        })
    }

    /// Generate one puzzle
    pub fn generate_one(&mut self, difficulty: Difficulty) -> Result<PuzzleData, GenerationError> {
        self.generate(difficulty).map(|generated| generated.puzzle)
    }

    /// Generate `count` puzzles one after another.
    ///
    /// Fails as a whole if any single puzzle fails; no partial batch is
    /// returned.
    pub fn generate_batch(
        &mut self,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<PuzzleData>, GenerationError> {
        if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&count) {
            return Err(GenerationError::InvalidConfiguration(format!(
                "batch size must be between {MIN_BATCH_SIZE} and {MAX_BATCH_SIZE}, got {count}"
            )));
        }

        let mut puzzles = Vec::with_capacity(count);
        for index in 0..count {
            let generated = self.generate(difficulty)?;
            debug!(
                "Puzzle {}/{count} ready after {} attempts",
                index + 1,
                generated.attempts
            );
            puzzles.push(generated.puzzle);
        }
        info!("Generated {count} puzzles at difficulty {difficulty}");
        Ok(puzzles)
    }
}
