//! Common error types for ReelDraw

use thiserror::Error;

/// Common result type for ReelDraw operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the sampling core and its collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested list or film does not exist (or is private)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network failure or error status from the upstream site
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    /// Every supplied reference resolved to zero usable films
    #[error("No valid lists: {0}")]
    NoValidLists(String),

    /// A list was picked but no film could be extracted from it
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Selection invariant violated; indicates a bug or stale pool data
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
