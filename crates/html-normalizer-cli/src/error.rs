//! Errors surfaced by the command-line tool.

use html_normalizer_rs::NormalizeError;
use thiserror::Error;

/// Failures that end a CLI run with a non-zero exit status.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file could not be read.
    #[error("Error reading file {path}: {source}")]
    ReadFile {
        /// Path as given on the command line.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Standard input could not be read.
    #[error("Error reading stdin: {0}")]
    ReadStdin(#[source] std::io::Error),

    /// Output file could not be written.
    #[error("Error writing file {path}: {source}")]
    WriteFile {
        /// Path as given on the command line.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Standard output could not be written.
    #[error("Error writing output: {0}")]
    WriteStdout(#[source] std::io::Error),

    /// The remote document could not be fetched.
    #[error("Error fetching URL {url}: {source}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Underlying HTTP error.
        source: reqwest::Error,
    },

    /// Config file could not be read.
    #[error("Error reading config {path}: {source}")]
    ReadConfig {
        /// Path as given on the command line.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Config file is not valid options JSON.
    #[error("Invalid config {path}: {source}")]
    ParseConfig {
        /// Path as given on the command line.
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Decoding or option errors from the library.
    #[error("Error: {0}")]
    Normalize(#[from] NormalizeError),
}
