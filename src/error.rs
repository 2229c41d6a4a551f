//! Error types for audio-prep
//!
//! Nothing is retried. OS failures pass through untouched as `Io`, external
//! tool failures surface as `Conversion`. An unreadable audio file is not an
//! error at all: the rate reader reports `SampleRate::Unknown` instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("File {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("Output path {} does not exist", .0.display())]
    OutputDirNotFound(PathBuf),

    #[error("Failed to convert '{}': {reason}", .path.display())]
    Conversion { path: PathBuf, reason: String },

    #[error("File name of '{}' has no extension", .0.display())]
    MissingExtension(PathBuf),

    #[error("'{}' has no usable file name", .0.display())]
    InvalidFileName(PathBuf),

    #[error("Input {} is inside the staging directory", .0.display())]
    InputInStaging(PathBuf),

    #[error("More than one input file is named '{0}'")]
    DuplicateFileName(String),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrepError>;

impl PrepError {
    /// Build a conversion error for the given input file
    pub fn conversion(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PrepError::Conversion {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for failures caused by a path that was expected but not found
    pub fn is_missing_path(&self) -> bool {
        match self {
            PrepError::MissingFile(_) | PrepError::OutputDirNotFound(_) => true,
            PrepError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
