//! Ingress shape errors

use thiserror::Error;

/// Ways a raw extracted document can fail the schema contract
///
/// `MissingKey` is the input-shape failure (the key set does not match the
/// template); `WrongShape` is the mapping-shape failure (a required key is
/// present but holds the wrong kind of value). Missing *values* are never
/// errors - optional absence is `null`, which always passes.
#[derive(Error, Debug)]
pub enum ShapeError {
    /// A required key path is absent from the document
    #[error("Required key `{path}` is absent from the extracted document")]
    MissingKey {
        /// Offending key path ("insurer", "plan.coverages")
        path: String,
    },

    /// A key holds a value of the wrong JSON kind
    #[error("Key `{path}` has the wrong shape: expected {expected}, found {actual}")]
    WrongShape {
        /// Offending key path
        path: String,
        /// Kind the template declares
        expected: &'static str,
        /// Kind actually found
        actual: &'static str,
    },

    /// The document root is not a JSON object
    #[error("Extracted document is not a JSON object")]
    NotAnObject,

    /// The document is not parseable JSON, or failed typed decoding
    #[error("Extracted document did not match the schema template: {0}")]
    Malformed(String),
}
