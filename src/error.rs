//! Error types for rs-distill.
//!
//! Most degradations during extraction are soft (empty fields, warnings on the
//! result). The variants here are the failures a caller has to handle.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The forum profile could not find a single post-like node to rebuild
    /// the thread from.
    #[error("No post-like node found for forum thread reconstruction")]
    MissingMainPost,

    /// Extraction options failed validation.
    #[error("Invalid extraction options: {0}")]
    InvalidOptions(String),

    /// Options or result (de)serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
