//! Puzzle representation types.
//!
//! `PuzzleData` serializes with the same snake_case field names the puzzle
//! store has always used, with the difficulty written as a plain integer.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::RequestError;

/// Smallest value allowed anywhere in a puzzle
pub const MIN_VALUE: u32 = 1;
/// Largest value allowed anywhere in a puzzle
pub const MAX_VALUE: u32 = 99;
/// Number of initial numbers in a standard puzzle
pub const NUMBERS_PER_PUZZLE: usize = 6;

/// Check whether a value lies strictly between 0 and 100
pub fn in_range(value: u32) -> bool {
    (MIN_VALUE..=MAX_VALUE).contains(&value)
}

/// Difficulty tier, 1 (easiest) through 4
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub enum Difficulty {
    One,
    Two,
    Three,
    Four,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::One,
        Difficulty::Two,
        Difficulty::Three,
        Difficulty::Four,
    ];

    /// Numeric tier (1-4)
    pub fn tier(self) -> u8 {
        match self {
            Difficulty::One => 1,
            Difficulty::Two => 2,
            Difficulty::Three => 3,
            Difficulty::Four => 4,
        }
    }

    /// Maximum number of combination steps a solution may take
    pub fn max_depth(self) -> usize {
        match self {
            Difficulty::One | Difficulty::Two => 3,
            Difficulty::Three => 4,
            Difficulty::Four => 5,
        }
    }

    /// Range the initial numbers are drawn from
    pub fn number_range(self) -> RangeInclusive<u32> {
        match self {
            Difficulty::One => MIN_VALUE..=9,
            _ => MIN_VALUE..=MAX_VALUE,
        }
    }

    /// Check if an operator may be used at this difficulty
    pub fn allows(self, operator: Operator) -> bool {
        match operator {
            Operator::Add | Operator::Subtract => true,
            Operator::Multiply | Operator::Divide => self > Difficulty::One,
        }
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = RequestError;

    fn try_from(tier: i64) -> Result<Self, Self::Error> {
        match tier {
            1 => Ok(Difficulty::One),
            2 => Ok(Difficulty::Two),
            3 => Ok(Difficulty::Three),
            4 => Ok(Difficulty::Four),
            _ => Err(RequestError::InvalidDifficulty(tier)),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> u8 {
        difficulty.tier()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tier())
    }
}

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply the operator, returning `None` for negative, overflowing or
    /// non-integral results
    pub fn apply(self, lhs: u32, rhs: u32) -> Option<u32> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Subtract => lhs.checked_sub(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Divide => {
                if rhs != 0 && lhs % rhs == 0 {
                    Some(lhs / rhs)
                } else {
                    None
                }
            }
        }
    }
}

/// A single binary operation as shown to the player, e.g. `8 - 3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub lhs: u32,
    pub operator: Operator,
    pub rhs: u32,
}

impl Operation {
    pub fn new(lhs: u32, operator: Operator, rhs: u32) -> Self {
        Self { lhs, operator, rhs }
    }

    /// Value of the operation, if it is a valid whole-number result
    pub fn evaluate(&self) -> Option<u32> {
        self.operator.apply(self.lhs, self.rhs)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator.symbol(), self.rhs)
    }
}

/// A computed value paired with the operation that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationResult {
    pub value: u32,
    pub operation: Operation,
}

impl OperationResult {
    /// Display label of the operation
    pub fn label(&self) -> String {
        self.operation.to_string()
    }
}

/// Multiset of numbers available at some point of a solution.
///
/// Values are kept sorted so that pair enumeration order is fixed. Equal
/// values are kept as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct State {
    values: SmallVec<[u32; NUMBERS_PER_PUZZLE]>,
}

impl State {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        let mut values: SmallVec<[u32; NUMBERS_PER_PUZZLE]> = values.into_iter().collect();
        values.sort_unstable();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// All unordered position pairs `(i, j)` with `i < j`, in order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        let len = self.values.len();
        (0..len).flat_map(move |i| (i + 1..len).map(move |j| (i, j)))
    }

    /// Remove the entries at positions `i` and `j` and insert `value`
    pub fn combine(&self, i: usize, j: usize, value: u32) -> Self {
        let (first, second) = if i < j { (i, j) } else { (j, i) };
        let mut values = self.values.clone();
        values.remove(second);
        values.remove(first);
        let insert_at = values.partition_point(|&v| v < value);
        values.insert(insert_at, value);
        Self { values }
    }

    /// Remove one entry equal to each operand and insert `value`.
    ///
    /// Returns `None` if an operand is not present.
    pub fn combine_values(&self, lhs: u32, rhs: u32, value: u32) -> Option<Self> {
        let i = self.values.binary_search(&lhs).ok()?;
        let j = if lhs == rhs {
            // need a second copy next to the first
            if self.values.get(i + 1) == Some(&rhs) {
                i + 1
            } else if i > 0 && self.values.get(i - 1) == Some(&rhs) {
                i - 1
            } else {
                return None;
            }
        } else {
            self.values.binary_search(&rhs).ok()?
        };
        Some(self.combine(i, j, value))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "}}")
    }
}

/// State reached after applying one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleStep {
    pub state: State,
    pub operation: Operation,
}

/// A generated puzzle, as handed to the puzzle store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleData {
    pub initial_numbers: Vec<u32>,
    pub target_number: u32,
    pub difficulty: Difficulty,
}

impl PuzzleData {
    /// Initial numbers as a search state
    pub fn initial_state(&self) -> State {
        State::new(self.initial_numbers.iter().copied())
    }
}
