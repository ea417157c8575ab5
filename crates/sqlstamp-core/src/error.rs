use std::path::PathBuf;

use thiserror::Error;

/// Core error type for sqlstamp operations.
#[derive(Error, Debug)]
pub enum StampError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Migrations directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid migration filename: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to rename {from} to {to}: {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Renaming {from} to {to} would overwrite an existing file")]
    Collision { from: String, to: String },

    #[error("Timestamp overflow: {base} + {index} does not fit in 64 bits")]
    TimestampOverflow { base: u64, index: usize },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl StampError {
    /// Whether this error was raised before the first rename was attempted.
    pub fn is_pre_mutation(&self) -> bool {
        !matches!(self, StampError::Rename { .. })
    }
}

/// Result type alias using StampError.
pub type Result<T> = std::result::Result<T, StampError>;
