//! Persistent snapshot cache for the parsed dataset.
//!
//! Parsing the raw export is the expensive step of a run, so the parsed
//! table is memoized as a bincode snapshot next to the source file. The
//! snapshot is write-once-then-read-many; a corrupt snapshot fails the load
//! rather than falling back to a re-parse.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use crate::readers::AccidentReader;
use crate::utils::constants::{DEFAULT_SNAPSHOT_FILE, DEFAULT_SOURCE_FILE};

pub struct DatasetCache {
    source_path: PathBuf,
    snapshot_path: PathBuf,
    use_mmap: bool,
}

impl DatasetCache {
    pub fn new(source_path: impl Into<PathBuf>, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            snapshot_path: snapshot_path.into(),
            use_mmap: false,
        }
    }

    /// Cache over the default file names in the working directory.
    pub fn with_default_paths() -> Self {
        Self::new(DEFAULT_SOURCE_FILE, DEFAULT_SNAPSHOT_FILE)
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Load the dataset, preferring the snapshot.
    ///
    /// Fast path: deserialize an existing snapshot. Slow path: parse the raw
    /// CSV export and write exactly one snapshot for future runs. Errors if
    /// neither file exists, or on the first malformed row of the source.
    pub fn load(&self) -> Result<Dataset> {
        if self.snapshot_path.exists() {
            info!(path = %self.snapshot_path.display(), "loading dataset snapshot");
            return self.read_snapshot();
        }

        if !self.source_path.exists() {
            return Err(ProcessingError::DataNotFound {
                source_path: self.source_path.clone(),
                snapshot_path: self.snapshot_path.clone(),
            });
        }

        info!(path = %self.source_path.display(), "parsing raw accidents export");
        let reader = AccidentReader::with_mmap(self.use_mmap);
        let dataset = Dataset::new(reader.read_accidents(&self.source_path)?);

        self.write_snapshot(&dataset)?;
        Ok(dataset)
    }

    fn read_snapshot(&self) -> Result<Dataset> {
        let bytes = fs::read(&self.snapshot_path)?;
        let (dataset, _) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
        Ok(dataset)
    }

    fn write_snapshot(&self, dataset: &Dataset) -> Result<()> {
        let bytes = bincode::serde::encode_to_vec(dataset, bincode::config::standard())?;
        fs::write(&self.snapshot_path, bytes)?;
        debug!(
            path = %self.snapshot_path.display(),
            rows = dataset.len(),
            "wrote dataset snapshot"
        );
        Ok(())
    }
}
