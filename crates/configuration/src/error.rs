//! Errors that can occur when reading or writing a schema.

use std::path::PathBuf;

/// The errors that can be thrown when reading a schema from disk.
#[derive(Debug, thiserror::Error)]
pub enum ParseSchemaError {
    #[error("parse error on {}:{line}:{column}: {message}", file_path.display())]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

/// The errors that can be thrown when writing a schema to disk.
#[derive(Debug, thiserror::Error)]
pub enum WriteSchemaError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
