//! Error handling
//!
//! Typed errors for loading documents into CouchDB, with descriptive
//! messages naming the attempted operation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or pushing documents
#[derive(Error, Debug)]
pub enum LoadError {
    /// Project directory lacks the `_design` directory
    #[error("Invalid project '{path}': missing '{path}/_design'. Pass the project directory.")]
    InvalidProject { path: PathBuf },

    /// Project has `_design` but no `_design/views`
    #[error("Not a design document project: '{path}' does not exist")]
    NotADesignDocumentProject { path: PathBuf },

    /// Document id is absent or empty
    #[error("Missing document id in '{path}'")]
    MissingId { path: PathBuf },

    /// View directory name is not valid UTF-8
    #[error("View directory name is not valid UTF-8: '{path}'")]
    InvalidViewName { path: PathBuf },

    /// Plain document could not be parsed as a JSON object
    #[error("Malformed document '{path}': {details}")]
    MalformedDocument { path: PathBuf, details: String },

    /// Scaffolding target already exists
    #[error("'{path}' already exists, try a different name")]
    ProjectExists { path: PathBuf },

    /// Database URL could not be parsed or used as a base
    #[error("Invalid database URL '{url}': {details}")]
    InvalidUrl { url: String, details: String },

    /// Transport-level failure talking to the store
    #[error("{operation} failed: store unreachable: {details}")]
    StoreUnreachable { operation: String, details: String },

    /// Store answered but did not signal success
    #[error("{operation} rejected by store\nOutput: {response}")]
    StoreRejected { operation: String, response: String },

    /// Filesystem failure with path context
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Create an error from an I/O error with path context
    pub fn from_io(error: io::Error, path: impl Into<PathBuf>) -> Self {
        LoadError::Io {
            path: path.into(),
            source: error,
        }
    }

    /// Check if this error came from the remote store rather than local files
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            LoadError::StoreUnreachable { .. } | LoadError::StoreRejected { .. }
        )
    }

    /// Raw store response, when the store produced one
    pub fn store_response(&self) -> Option<&str> {
        match self {
            LoadError::StoreRejected { response, .. } => Some(response),
            _ => None,
        }
    }
}

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;
