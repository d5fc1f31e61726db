//! Error types for the fallible parts of the crate.
//!
//! Only snapshot restoration and JSON encoding can fail. Tree operations
//! themselves are total; structural invariant violations are bugs and panic.

use thiserror::Error;

/// Errors raised while encoding, decoding or restoring a tree snapshot.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The JSON text could not be produced or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The node tree breaks a structural invariant of the index.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
