//! Error types for cleave.

/// Errors that can occur during chunking.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// Overlap exceeds chunk size.
    #[error("overlap {overlap} exceeds chunk size {size}")]
    OverlapExceedsSize {
        /// The chunk size.
        size: usize,
        /// The overlap that exceeded the size.
        overlap: usize,
    },

    /// An opening tag has no matching closing tag.
    #[error("invalid HTML: <{tag}> is not properly terminated")]
    UnterminatedTag {
        /// The tag name, without angle brackets.
        tag: String,
    },

    /// A strategy token that no chunker recognizes.
    #[error("unknown chunking strategy {0}")]
    UnknownStrategy(String),

    /// A custom delimiter pattern failed to compile.
    #[error("invalid delimiter pattern: {0}")]
    InvalidPattern(#[from] regex_lite::Error),
}

/// Result type for cleave operations.
pub type Result<T> = std::result::Result<T, Error>;
