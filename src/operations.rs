//! Enumeration of the operations allowed between two numbers.
//!
//! Every result outside 1..=99 is dropped here, so the solver never sees
//! zero, negative or oversized intermediate values.

use smallvec::SmallVec;

use crate::puzzle::{in_range, Difficulty, Operation, OperationResult, Operator};

/// At most five candidates: add, subtract, multiply and two quotients
pub type Operations = SmallVec<[OperationResult; 5]>;

/// List the results reachable by combining `a` and `b` at a difficulty.
///
/// Candidates are produced in a fixed order: `a + b`, the difference written
/// larger-minus-smaller, then (above difficulty 1) `a * b`, `a / b` and
/// `b / a`. Quotients are only offered when exact.
pub fn valid_operations(a: u32, b: u32, difficulty: Difficulty) -> Operations {
    let mut candidates: SmallVec<[Operation; 5]> = SmallVec::new();

    candidates.push(Operation::new(a, Operator::Add, b));
    if a >= b {
        candidates.push(Operation::new(a, Operator::Subtract, b));
    } else {
        candidates.push(Operation::new(b, Operator::Subtract, a));
    }

    if difficulty.allows(Operator::Multiply) {
        candidates.push(Operation::new(a, Operator::Multiply, b));
    }
    if difficulty.allows(Operator::Divide) {
        if b != 0 && a % b == 0 {
            candidates.push(Operation::new(a, Operator::Divide, b));
        }
        if a != 0 && b % a == 0 {
            candidates.push(Operation::new(b, Operator::Divide, a));
        }
    }

    candidates
        .into_iter()
        .filter_map(|operation| {
            let value = operation.evaluate()?;
            in_range(value).then_some(OperationResult { value, operation })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(ops: &Operations) -> Vec<(u32, String)> {
        ops.iter().map(|op| (op.value, op.label())).collect()
    }

    #[test]
    fn test_addition_and_subtraction_only_at_difficulty_one() {
        for a in 1..=99 {
            for b in 1..=99 {
                for op in valid_operations(a, b, Difficulty::One) {
                    assert!(matches!(
                        op.operation.operator,
                        Operator::Add | Operator::Subtract
                    ));
                }
            }
        }
    }

    #[test]
    fn test_subtraction_label_is_never_negative() {
        let ops = valid_operations(3, 8, Difficulty::One);
        assert_eq!(
            labels(&ops),
            vec![(11, "3 + 8".to_string()), (5, "8 - 3".to_string())]
        );
    }

    #[test]
    fn test_equal_numbers_drop_zero_difference() {
        let ops = valid_operations(7, 7, Difficulty::One);
        assert_eq!(labels(&ops), vec![(14, "7 + 7".to_string())]);

        // Zero is still dropped when multiplication and division are allowed
        let ops = valid_operations(7, 7, Difficulty::Four);
        assert!(ops.iter().all(|op| op.value != 0));
        assert_eq!(ops[0].value, 14);
        assert!(ops
            .iter()
            .all(|op| op.operation.operator != Operator::Subtract));
    }

    #[test]
    fn test_all_operators_at_difficulty_two() {
        let ops = valid_operations(6, 3, Difficulty::Two);
        assert_eq!(
            labels(&ops),
            vec![
                (9, "6 + 3".to_string()),
                (3, "6 - 3".to_string()),
                (18, "6 * 3".to_string()),
                (2, "6 / 3".to_string()),
            ]
        );
        assert!(!labels(&ops).iter().any(|(_, label)| label == "3 / 6"));
    }

    #[test]
    fn test_quotient_in_both_directions() {
        let ops = valid_operations(4, 20, Difficulty::Three);
        let labels = labels(&ops);
        assert!(labels.contains(&(5, "20 / 4".to_string())));
        assert!(!labels.iter().any(|(_, label)| label == "4 / 20"));
    }

    #[test]
    fn test_out_of_range_results_filtered() {
        // 60 + 50 and 60 * 50 are both too large
        let ops = valid_operations(60, 50, Difficulty::Four);
        assert_eq!(labels(&ops), vec![(10, "60 - 50".to_string())]);

        for a in 1..=99 {
            for b in 1..=99 {
                for op in valid_operations(a, b, Difficulty::Four) {
                    assert!(in_range(op.value));
                }
            }
        }
    }
}
