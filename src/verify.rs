//! Replay of solution paths with step-by-step checks.
//!
//! This module checks that a puzzle is well formed and that a given sequence
//! of steps really turns its initial numbers into a state holding the target.

use crate::error::InvariantViolation;
use crate::puzzle::{in_range, Operator, PuzzleData, PuzzleStep, NUMBERS_PER_PUZZLE};

/// Result status of replaying a solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Target present after the last step
    Solved,
    /// An operand is not available in the current state
    IllegalOperand,
    /// Operator not permitted at the puzzle's difficulty
    OperatorNotAllowed,
    /// Result is not a whole number in 1..=99
    OutOfRange,
    /// Recorded state differs from the replayed one
    StateMismatch,
    /// More steps than the difficulty allows
    TooLong,
    /// All steps valid but the target never appears
    TargetNotReached,
}

/// Metrics collected while replaying a solution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionMetrics {
    pub steps: usize,
    pub additions: usize,
    pub subtractions: usize,
    pub multiplications: usize,
    pub divisions: usize,
    pub largest_value: u32,
}

impl SolutionMetrics {
    /// Steps using multiplication or division
    pub fn multiplicative_steps(&self) -> usize {
        self.multiplications + self.divisions
    }

    fn record(&mut self, operator: Operator, value: u32) {
        self.steps += 1;
        match operator {
            Operator::Add => self.additions += 1,
            Operator::Subtract => self.subtractions += 1,
            Operator::Multiply => self.multiplications += 1,
            Operator::Divide => self.divisions += 1,
        }
        self.largest_value = self.largest_value.max(value);
    }
}

/// Result of replaying a solution
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub status: VerificationStatus,
    pub metrics: SolutionMetrics,
    /// Index of the first offending step, if a step was at fault
    pub failed_step: Option<usize>,
    pub solved: bool,
}

impl VerificationResult {
    fn finish(
        status: VerificationStatus,
        metrics: SolutionMetrics,
        failed_step: Option<usize>,
    ) -> Self {
        Self {
            status,
            metrics,
            failed_step,
            solved: status == VerificationStatus::Solved,
        }
    }
}

/// Check the structural rules every emitted puzzle must satisfy
pub fn check_puzzle(puzzle: &PuzzleData) -> Result<(), InvariantViolation> {
    let numbers = &puzzle.initial_numbers;
    if numbers.len() != NUMBERS_PER_PUZZLE {
        return Err(InvariantViolation::WrongCount {
            expected: NUMBERS_PER_PUZZLE,
            found: numbers.len(),
        });
    }

    let range = puzzle.difficulty.number_range();
    for (i, &number) in numbers.iter().enumerate() {
        if !range.contains(&number) {
            return Err(InvariantViolation::NumberOutOfRange {
                number,
                min: *range.start(),
                max: *range.end(),
            });
        }
        if numbers[i + 1..].contains(&number) {
            return Err(InvariantViolation::DuplicateNumber(number));
        }
    }

    let target = puzzle.target_number;
    if !in_range(target) {
        return Err(InvariantViolation::TargetOutOfRange(target));
    }
    if numbers.contains(&target) {
        return Err(InvariantViolation::TargetInNumbers(target));
    }

    Ok(())
}

/// Replay `path` from the puzzle's initial numbers
pub fn verify_solution(puzzle: &PuzzleData, path: &[PuzzleStep]) -> VerificationResult {
    let mut metrics = SolutionMetrics::default();

    if path.len() > puzzle.difficulty.max_depth() {
        return VerificationResult::finish(VerificationStatus::TooLong, metrics, None);
    }

    let mut state = puzzle.initial_state();
    for (index, step) in path.iter().enumerate() {
        let operation = step.operation;

        if !puzzle.difficulty.allows(operation.operator) {
            return VerificationResult::finish(
                VerificationStatus::OperatorNotAllowed,
                metrics,
                Some(index),
            );
        }

        let value = match operation.evaluate() {
            Some(value) if in_range(value) => value,
            _ => {
                return VerificationResult::finish(
                    VerificationStatus::OutOfRange,
                    metrics,
                    Some(index),
                )
            }
        };

        let Some(next) = state.combine_values(operation.lhs, operation.rhs, value) else {
            return VerificationResult::finish(
                VerificationStatus::IllegalOperand,
                metrics,
                Some(index),
            );
        };

        if next != step.state {
            return VerificationResult::finish(
                VerificationStatus::StateMismatch,
                metrics,
                Some(index),
            );
        }

        metrics.record(operation.operator, value);
        state = next;
    }

    let status = if state.contains(puzzle.target_number) {
        VerificationStatus::Solved
    } else {
        VerificationStatus::TargetNotReached
    };
    VerificationResult::finish(status, metrics, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Difficulty, Operation, State};

    fn create_puzzle(difficulty: Difficulty) -> PuzzleData {
        PuzzleData {
            initial_numbers: vec![3, 8, 12, 40, 51, 77],
            target_number: 24,
            difficulty,
        }
    }

    fn step(values: &[u32], lhs: u32, operator: Operator, rhs: u32) -> PuzzleStep {
        PuzzleStep {
            state: State::new(values.iter().copied()),
            operation: Operation::new(lhs, operator, rhs),
        }
    }

    #[test]
    fn test_valid_puzzle_passes_checks() {
        assert_eq!(check_puzzle(&create_puzzle(Difficulty::Two)), Ok(()));
    }

    #[test]
    fn test_structural_violations() {
        let mut puzzle = create_puzzle(Difficulty::Two);
        puzzle.initial_numbers.pop();
        assert!(matches!(
            check_puzzle(&puzzle),
            Err(InvariantViolation::WrongCount { found: 5, .. })
        ));

        let mut puzzle = create_puzzle(Difficulty::Two);
        puzzle.initial_numbers[1] = 3;
        assert_eq!(
            check_puzzle(&puzzle),
            Err(InvariantViolation::DuplicateNumber(3))
        );

        // 12 is not a single digit
        let puzzle = create_puzzle(Difficulty::One);
        assert!(matches!(
            check_puzzle(&puzzle),
            Err(InvariantViolation::NumberOutOfRange { number: 12, .. })
        ));

        let mut puzzle = create_puzzle(Difficulty::Two);
        puzzle.target_number = 100;
        assert_eq!(
            check_puzzle(&puzzle),
            Err(InvariantViolation::TargetOutOfRange(100))
        );

        puzzle.target_number = 40;
        assert_eq!(
            check_puzzle(&puzzle),
            Err(InvariantViolation::TargetInNumbers(40))
        );
    }

    #[test]
    fn test_replay_valid_solution() {
        let puzzle = create_puzzle(Difficulty::Two);
        let path = vec![step(&[12, 24, 40, 51, 77], 3, Operator::Multiply, 8)];

        let result = verify_solution(&puzzle, &path);
        assert!(result.solved);
        assert_eq!(result.metrics.steps, 1);
        assert_eq!(result.metrics.multiplicative_steps(), 1);
        assert_eq!(result.metrics.largest_value, 24);
    }

    #[test]
    fn test_replay_rejects_disallowed_operator() {
        let mut puzzle = create_puzzle(Difficulty::One);
        puzzle.initial_numbers = vec![1, 2, 3, 4, 5, 8];
        let path = vec![step(&[1, 2, 4, 5, 24], 3, Operator::Multiply, 8)];

        let result = verify_solution(&puzzle, &path);
        assert_eq!(result.status, VerificationStatus::OperatorNotAllowed);
        assert_eq!(result.failed_step, Some(0));
    }

    #[test]
    fn test_replay_rejects_missing_operand() {
        let puzzle = create_puzzle(Difficulty::Two);
        let path = vec![step(&[8, 12, 24, 51, 77], 4, Operator::Multiply, 6)];

        let result = verify_solution(&puzzle, &path);
        assert_eq!(result.status, VerificationStatus::IllegalOperand);
    }

    #[test]
    fn test_replay_rejects_out_of_range_and_mismatch() {
        let puzzle = create_puzzle(Difficulty::Two);

        let path = vec![step(&[3, 8, 12, 40, 128], 51, Operator::Add, 77)];
        assert_eq!(
            verify_solution(&puzzle, &path).status,
            VerificationStatus::OutOfRange
        );

        let path = vec![step(&[3, 8, 12, 51, 77], 40, Operator::Divide, 8)];
        assert_eq!(
            verify_solution(&puzzle, &path).status,
            VerificationStatus::StateMismatch
        );
    }

    #[test]
    fn test_replay_target_not_reached() {
        let puzzle = create_puzzle(Difficulty::Two);
        let path = vec![step(&[11, 12, 40, 51, 77], 3, Operator::Add, 8)];

        let result = verify_solution(&puzzle, &path);
        assert_eq!(result.status, VerificationStatus::TargetNotReached);
        assert!(!result.solved);
    }

    #[test]
    fn test_replay_too_long() {
        let puzzle = create_puzzle(Difficulty::Two);
        let filler = step(&[1], 1, Operator::Add, 1);
        let path = vec![filler; 4];

        assert_eq!(
            verify_solution(&puzzle, &path).status,
            VerificationStatus::TooLong
        );
    }
}
