//! Error types for dataset setup.
//!
//! Everything here is fatal: it is raised while opening a dataset, before
//! the session starts, and has no recovery path. Errors that can happen once
//! the session runs are recoverable and live next to the code that handles
//! them (see [`RecordError`](crate::format::RecordError)).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent a dataset from being opened.
#[derive(Error, Debug)]
pub enum SetupError {
    /// No dataset directory given and none found under the default root
    #[error("No dataset directory found under {root:?}")]
    NoDataset {
        /// Directory that was searched
        root: PathBuf,
    },

    /// The dataset has no images directory
    #[error("{path:?} was not found")]
    ImagesDirMissing {
        /// Expected images directory
        path: PathBuf,
    },

    /// The images directory holds no matching images
    #[error("0 images found in {path:?}")]
    NoImages {
        /// The images directory that was scanned
        path: PathBuf,
    },

    /// The dataset has no template file
    #[error("{path:?} was not found")]
    TemplateMissing {
        /// Expected template path
        path: PathBuf,
    },

    /// The template exists but is not a JSON object of fields
    #[error("Invalid template {path:?}: {message}")]
    InvalidTemplate {
        /// Template path
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// The configuration file could not be parsed
    #[error("Invalid configuration {path:?}: {source}")]
    InvalidConfig {
        /// Configuration path
        path: PathBuf,
        /// What is wrong with it
        source: crate::config::ConfigError,
    },

    /// I/O error while preparing the dataset layout
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SetupError {
    /// Create an invalid template error with a message.
    pub fn invalid_template(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            path: path.into(),
            message: message.into(),
        }
    }
}
