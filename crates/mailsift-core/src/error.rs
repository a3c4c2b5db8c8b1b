//! Failures while loading rosters and message dumps.

use thiserror::Error;

/// Errors from settings, message loading and filter setup.
///
/// A missing settings file is not an error; [`crate::Settings::load`]
/// falls back to an empty roster. A settings file or message dump that
/// exists but doesn't parse is reported as [`Error::Serde`].
#[derive(Debug, Error)]
pub enum Error {
    /// A built-in pattern table failed to compile.
    #[error("Classifier error: {0}")]
    Classifier(#[from] mailsift_classify::Error),

    /// Settings or message JSON is malformed or has the wrong shape.
    #[error("Malformed JSON: {0}")]
    Serde(#[from] serde_json::Error),

    /// A settings file or message dump couldn't be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A roster entry was rejected, such as an address without `@`.
    #[error("Invalid roster entry: {0}")]
    Config(String),
}

/// Result alias for roster and digest operations.
pub type Result<T> = std::result::Result<T, Error>;
