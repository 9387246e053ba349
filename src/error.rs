//! Error taxonomy for the cleanup and import passes.
//!
//! These are the file-level failures. Per-form and per-entry conditions
//! (unclassifiable diacritics, integrity mismatches, missing headwords) are
//! recovered in place and surface as counters in the run summary instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    /// The document could not be parsed as XML; the file is skipped.
    #[error("malformed document {path}: {message}")]
    MalformedDocument { path: PathBuf, message: String },

    /// Filename does not end in the 0/1 partition digit; the file is
    /// excluded from both passes.
    #[error("unknown file suffix: {0}")]
    UnknownFileSuffix(String),

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl LexError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LexError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LexError::MalformedDocument {
            path: path.into(),
            message: message.into(),
        }
    }
}
