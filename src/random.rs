//! Random drawing of initial numbers and targets.

use rand::Rng;

use crate::error::GenerationError;
use crate::puzzle::{Difficulty, MAX_VALUE, MIN_VALUE};

/// Draw `n` distinct numbers from the difficulty's range, in draw order.
///
/// Duplicates are discarded and redrawn. Asking for more numbers than the
/// range holds is a configuration error.
pub fn random_numbers<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    difficulty: Difficulty,
) -> Result<Vec<u32>, GenerationError> {
    let range = difficulty.number_range();
    let available = (range.end() - range.start() + 1) as usize;
    if n > available {
        return Err(GenerationError::InvalidConfiguration(format!(
            "cannot draw {n} distinct numbers from {}..={} at difficulty {difficulty}",
            range.start(),
            range.end()
        )));
    }

    let mut numbers = Vec::with_capacity(n);
    while numbers.len() < n {
        let candidate = rng.random_range(range.clone());
        if !numbers.contains(&candidate) {
            numbers.push(candidate);
        }
    }
    Ok(numbers)
}

/// Draw a target in 1..=99 that is not one of `numbers`
pub fn random_target<R: Rng + ?Sized>(
    rng: &mut R,
    numbers: &[u32],
) -> Result<u32, GenerationError> {
    if (MIN_VALUE..=MAX_VALUE).all(|value| numbers.contains(&value)) {
        return Err(GenerationError::InvalidConfiguration(
            "initial numbers cover every possible target".to_string(),
        ));
    }

    loop {
        let target = rng.random_range(MIN_VALUE..=MAX_VALUE);
        if !numbers.contains(&target) {
            return Ok(target);
        }
    }
}
