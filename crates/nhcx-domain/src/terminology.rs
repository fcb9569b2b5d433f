//! Coded-concept entry produced by terminology resolution

use serde::{Deserialize, Serialize};

/// A standardized concept: code, coding-system URI and canonical display
///
/// Entries are static dictionary rows; the resolver hands out references to
/// them and the mapper copies the fields into a FHIR `Coding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyEntry {
    /// Concept code within the system ("64915003")
    pub code: String,

    /// Coding-system URI ("http://snomed.info/sct")
    pub system: String,

    /// Canonical human-readable display for the concept
    pub display: String,
}

impl TerminologyEntry {
    /// Create an entry
    pub fn new(
        code: impl Into<String>,
        system: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            system: system.into(),
            display: display.into(),
        }
    }
}
