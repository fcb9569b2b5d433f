//! Terminology load errors

use thiserror::Error;

/// Errors that can occur while loading a dictionary
///
/// Resolution itself never errors; only the one-time load can.
#[derive(Error, Debug)]
pub enum TerminologyError {
    /// Dictionary document is not valid JSON or not the expected shape
    #[error("Dictionary parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Dictionary declared no coding system URI
    #[error("Dictionary has an empty coding-system URI")]
    MissingSystem,
}
