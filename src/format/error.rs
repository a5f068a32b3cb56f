//! Error types for annotation file operations.

use thiserror::Error;

use crate::model::SchemaMismatch;

/// Errors that can occur while reading or writing an annotation record.
///
/// None of these stop a session: callers log them and fall back to the
/// template default or skip the file.
#[derive(Error, Debug)]
pub enum RecordError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The record's fields differ from the template's
    #[error("Record does not match template: {0}")]
    SchemaMismatch(SchemaMismatch),
}

impl From<SchemaMismatch> for RecordError {
    fn from(mismatch: SchemaMismatch) -> Self {
        Self::SchemaMismatch(mismatch)
    }
}
