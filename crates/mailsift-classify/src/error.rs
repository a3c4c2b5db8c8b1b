//! Error types for classifier construction.

/// Result type alias for classifier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifier error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A static pattern table failed to compile.
    #[error("Invalid pattern in {table} table: {source}")]
    Pattern {
        /// Name of the offending table.
        table: &'static str,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}
