//! Persistence of generated puzzles.
//!
//! A store receives a whole batch at once and either keeps all of it or
//! none of it. The generator never retries a failed commit.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::{ServiceError, StoreError};
use crate::generator::PuzzleGenerator;
use crate::puzzle::PuzzleData;
use crate::request::GenerationRequest;

/// All-or-nothing sink for puzzle batches
pub trait PuzzleStore {
    /// Commit every puzzle of the batch, or none of them
    fn commit(&mut self, puzzles: &[PuzzleData]) -> Result<(), StoreError>;
}

/// In-memory store, mainly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    puzzles: Vec<PuzzleData>,
    commits: usize,
    reject_reason: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every commit with the given reason
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            reject_reason: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn puzzles(&self) -> &[PuzzleData] {
        &self.puzzles
    }

    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl PuzzleStore for MemoryStore {
    fn commit(&mut self, puzzles: &[PuzzleData]) -> Result<(), StoreError> {
        if let Some(reason) = &self.reject_reason {
            return Err(StoreError::Rejected(reason.clone()));
        }
        self.puzzles.extend_from_slice(puzzles);
        self.commits += 1;
        Ok(())
    }
}

/// Store keeping all puzzles in one JSON array file.
///
/// A commit writes the merged array to a sibling temporary file and renames
/// it over the store file, so readers never see half a batch.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored puzzle (empty if the file does not exist yet)
    pub fn load(&self) -> Result<Vec<PuzzleData>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PuzzleStore for JsonFileStore {
    fn commit(&mut self, puzzles: &[PuzzleData]) -> Result<(), StoreError> {
        let mut all = self.load()?;
        all.extend_from_slice(puzzles);

        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_string_pretty(&all)?)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Outcome of a successful generate-and-store run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReport {
    pub stored: usize,
}

impl StoreReport {
    pub fn message(&self) -> String {
        format!("Successfully generated and stored {} puzzles.", self.stored)
    }
}

/// Validate a request, generate the whole batch, then commit it once.
///
/// A store failure is reported as [`ServiceError::Persistence`] and the
/// generated puzzles are dropped.
pub fn generate_and_store<R: rand::Rng, S: PuzzleStore + ?Sized>(
    generator: &mut PuzzleGenerator<R>,
    request: &GenerationRequest,
    store: &mut S,
) -> Result<StoreReport, ServiceError> {
    let request = request.validate()?;

    let puzzles = generator.generate_batch(request.difficulty, request.number_of_puzzles)?;

    if let Err(source) = store.commit(&puzzles) {
        error!("Error storing puzzles: {source}");
        return Err(ServiceError::Persistence {
            generated: puzzles.len(),
            source,
        });
    }

    info!("Stored {} puzzles", puzzles.len());
    Ok(StoreReport {
        stored: puzzles.len(),
    })
}
