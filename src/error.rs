use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Neither snapshot nor raw source found (looked for {snapshot_path:?} and {source_path:?})")]
    DataNotFound {
        source_path: PathBuf,
        snapshot_path: PathBuf,
    },

    #[error("Snapshot encode error: {0}")]
    SnapshotEncode(#[from] bincode::error::EncodeError),

    #[error("Snapshot decode error: {0}")]
    SnapshotDecode(#[from] bincode::error::DecodeError),

    #[error("Sample size {requested} exceeds available rows {available}")]
    InsufficientRows { requested: usize, available: usize },

    #[error("Dataset contains no records")]
    EmptyDataset,

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}
