//! Bounded depth-first search for a combination sequence reaching a target.
//!
//! Each step replaces two numbers of the state with the result of one valid
//! operation between them. The first sequence found wins; there is no
//! attempt to find a shorter one and no memoization of visited states.

use crate::operations::valid_operations;
use crate::puzzle::{Difficulty, PuzzleData, PuzzleStep, State};

/// Result of a combination search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Whether the target was reached within the depth limit
    pub found: bool,
    /// Steps taken from the starting state (empty if not found)
    pub path: Vec<PuzzleStep>,
    /// Number of states popped from the search stack
    pub states_explored: usize,
}

/// A state on the search stack, with the steps that led to it
#[derive(Debug, Clone)]
struct SearchFrame {
    state: State,
    depth: usize,
    path: Vec<PuzzleStep>,
}

/// Search for a sequence of at most `max_depth - depth` steps that puts
/// `target` into the state.
///
/// Children are pushed in reverse so that pairs and operations are popped in
/// their enumeration order; the path returned is the same one a recursive
/// search would return first.
pub fn find_solution(
    state: &State,
    target: u32,
    difficulty: Difficulty,
    depth: usize,
    max_depth: usize,
) -> SearchResult {
    let mut states_explored: usize = 0;

    let mut stack: Vec<SearchFrame> = vec![SearchFrame {
        state: state.clone(),
        depth,
        path: Vec::new(),
    }];

    while let Some(frame) = stack.pop() {
        states_explored += 1;

        if frame.state.contains(target) {
            return SearchResult {
                found: true,
                path: frame.path,
                states_explored,
            };
        }

        if frame.depth >= max_depth {
            continue;
        }

        let mut children = Vec::new();
        for (i, j) in frame.state.pairs() {
            let (a, b) = (frame.state.values()[i], frame.state.values()[j]);
            for result in valid_operations(a, b, difficulty) {
                let next_state = frame.state.combine(i, j, result.value);
                let mut path = frame.path.clone();
                path.push(PuzzleStep {
                    state: next_state.clone(),
                    operation: result.operation,
                });
                children.push(SearchFrame {
                    state: next_state,
                    depth: frame.depth + 1,
                    path,
                });
            }
        }

        stack.extend(children.into_iter().rev());
    }

    SearchResult {
        found: false,
        path: Vec::new(),
        states_explored,
    }
}

/// Search for a solution of a puzzle within its difficulty's depth limit
pub fn solve(puzzle: &PuzzleData) -> SearchResult {
    find_solution(
        &puzzle.initial_state(),
        puzzle.target_number,
        puzzle.difficulty,
        0,
        puzzle.difficulty.max_depth(),
    )
}
