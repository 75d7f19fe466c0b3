//! Generation requests as they arrive from a client.
//!
//! Fields may be missing (default 1), plain integers, or numeric strings.
//! Validation happens before any generation work starts.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::generator::{MAX_BATCH_SIZE, MIN_BATCH_SIZE};
use crate::puzzle::Difficulty;

/// A request field given either as a number or as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestValue {
    Integer(i64),
    Text(String),
}

impl RequestValue {
    fn parse(&self, field: &str) -> Result<i64, RequestError> {
        match self {
            RequestValue::Integer(value) => Ok(*value),
            RequestValue::Text(text) => text.trim().parse().map_err(|_| {
                RequestError::Malformed(format!("{field} must be an integer, got {text:?}"))
            }),
        }
    }
}

impl From<i64> for RequestValue {
    fn from(value: i64) -> Self {
        RequestValue::Integer(value)
    }
}

/// Raw request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub difficulty: Option<RequestValue>,
    #[serde(default)]
    pub number_of_puzzles: Option<RequestValue>,
}

/// A request whose values are known to be in range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub difficulty: Difficulty,
    pub number_of_puzzles: usize,
}

impl GenerationRequest {
    pub fn new(difficulty: i64, number_of_puzzles: i64) -> Self {
        Self {
            difficulty: Some(difficulty.into()),
            number_of_puzzles: Some(number_of_puzzles.into()),
        }
    }

    /// Parse a JSON request body
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        serde_json::from_str(body).map_err(|e| RequestError::Malformed(e.to_string()))
    }

    /// Check both fields and convert them to their typed forms
    pub fn validate(&self) -> Result<ValidatedRequest, RequestError> {
        let difficulty = match &self.difficulty {
            Some(value) => Difficulty::try_from(value.parse("difficulty")?)?,
            None => Difficulty::One,
        };

        let number_of_puzzles = match &self.number_of_puzzles {
            Some(value) => value.parse("numberOfPuzzles")?,
            None => 1,
        };
        let number_of_puzzles = usize::try_from(number_of_puzzles)
            .ok()
            .filter(|count| (MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(count))
            .ok_or(RequestError::InvalidPuzzleCount(number_of_puzzles))?;

        Ok(ValidatedRequest {
            difficulty,
            number_of_puzzles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = GenerationRequest::from_json("{}").unwrap();
        assert_eq!(
            request.validate(),
            Ok(ValidatedRequest {
                difficulty: Difficulty::One,
                number_of_puzzles: 1,
            })
        );
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let request =
            GenerationRequest::from_json(r#"{"difficulty": "3", "numberOfPuzzles": " 12 "}"#)
                .unwrap();
        assert_eq!(
            request.validate(),
            Ok(ValidatedRequest {
                difficulty: Difficulty::Three,
                number_of_puzzles: 12,
            })
        );

        let request =
            GenerationRequest::from_json(r#"{"difficulty": 4, "numberOfPuzzles": 20}"#).unwrap();
        assert_eq!(request.validate().unwrap().difficulty, Difficulty::Four);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert_eq!(
            GenerationRequest::new(0, 1).validate(),
            Err(RequestError::InvalidDifficulty(0))
        );
        assert_eq!(
            GenerationRequest::new(5, 1).validate(),
            Err(RequestError::InvalidDifficulty(5))
        );
        assert_eq!(
            GenerationRequest::new(2, 0).validate(),
            Err(RequestError::InvalidPuzzleCount(0))
        );
        assert_eq!(
            GenerationRequest::new(2, 21).validate(),
            Err(RequestError::InvalidPuzzleCount(21))
        );
        assert_eq!(
            GenerationRequest::new(2, -3).validate(),
            Err(RequestError::InvalidPuzzleCount(-3))
        );
    }

    #[test]
    fn test_malformed_values_rejected() {
        let request = GenerationRequest::from_json(r#"{"difficulty": "hard"}"#).unwrap();
        assert!(matches!(
            request.validate(),
            Err(RequestError::Malformed(_))
        ));
        assert!(GenerationRequest::from_json("not json").is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = GenerationRequest::new(9, 1).validate().unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Difficulty must be between 1 and 4"));
        let err = GenerationRequest::new(1, 50).validate().unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Number of puzzles must be between 1 and 20"));
    }
}
