use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library.
///
/// Only failures that abort a run are represented here. Unparseable YAML in a
/// route comment or in the components block is logged and degraded to empty
/// values instead of being returned.
#[derive(Debug, Error)]
pub enum Error {
    /// A route declaration line did not have the expected verb/URL/handler shape.
    #[error("malformed route signature `{line}`: {reason}")]
    MalformedSignature { line: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration {}: {message}", .file.display())]
    Config { file: PathBuf, message: String },
}

impl Error {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        Error::MalformedSignature {
            line: line.trim().to_string(),
            reason: reason.into(),
        }
    }
}
