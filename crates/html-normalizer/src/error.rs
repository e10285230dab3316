//! Error types for HTML normalization.

use thiserror::Error;

/// Result type for normalizer operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Errors that can occur around normalization.
///
/// Normalizing a `&str` never fails; these cover the edges where raw bytes or
/// user-supplied settings enter the library.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The requested character encoding label is not recognized.
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// A heading level outside `1..=6` (or `h1`..`h6`) was requested.
    #[error("Invalid heading level: {0} (expected 1-6)")]
    InvalidHeadingLevel(String),
}
