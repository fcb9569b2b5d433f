//! Dictionary loading and lookup

use std::collections::HashMap;

use nhcx_domain::TerminologyEntry;
use serde::Deserialize;
use tracing::debug;

use crate::TerminologyError;

/// Starter SNOMED CT dictionary shipped with the crate
const BUILTIN_DICTIONARY: &str = include_str!("../data/snomed_dictionary.json");

/// Wire format of a dictionary document
#[derive(Deserialize)]
struct DictionaryFile {
    system: String,
    concepts: HashMap<String, ConceptRow>,
}

#[derive(Deserialize)]
struct ConceptRow {
    code: String,
    display: String,
}

/// An immutable free-text-to-concept dictionary
///
/// Keys are normalized at load time; [`TerminologyDict::resolve`] normalizes
/// its input the same way, so lookups are insensitive to case and interior
/// whitespace but otherwise exact.
#[derive(Debug, Clone)]
pub struct TerminologyDict {
    entries: HashMap<String, TerminologyEntry>,
}

impl TerminologyDict {
    /// Load a dictionary from its JSON document
    pub fn from_json(json: &str) -> Result<Self, TerminologyError> {
        let file: DictionaryFile = serde_json::from_str(json)?;
        if file.system.trim().is_empty() {
            return Err(TerminologyError::MissingSystem);
        }

        let mut entries = HashMap::with_capacity(file.concepts.len());
        for (label, row) in file.concepts {
            entries.insert(
                normalize(&label),
                TerminologyEntry::new(row.code, file.system.clone(), row.display),
            );
        }
        debug!(concepts = entries.len(), "terminology dictionary loaded");
        Ok(Self { entries })
    }

    /// The dictionary embedded in this crate
    pub fn builtin() -> Self {
        // The embedded document is checked by tests; a parse failure here is
        // a build defect, not a runtime condition.
        Self::from_json(BUILTIN_DICTIONARY).expect("embedded dictionary is valid")
    }

    /// Build a dictionary from `(label, code, display)` rows, all in one
    /// coding system - the test-fixture path
    pub fn from_entries<'a, I>(system: &str, rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let entries = rows
            .into_iter()
            .map(|(label, code, display)| {
                (
                    normalize(label),
                    TerminologyEntry::new(code, system, display),
                )
            })
            .collect();
        Self { entries }
    }

    /// Resolve a free-text term to its coded concept
    ///
    /// Returns `None` when the normalized term has no dictionary row; the
    /// caller falls back to uncoded free text.
    pub fn resolve(&self, term: &str) -> Option<&TerminologyEntry> {
        self.entries.get(&normalize(term))
    }

    /// Number of concepts in the dictionary
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no concepts
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Case-fold and collapse whitespace runs to single spaces
fn normalize(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dict() -> TerminologyDict {
        TerminologyDict::from_entries(
            "http://snomed.info/sct",
            [("Cardiac Surgery", "P1", "Cardiac surgery")],
        )
    }

    #[test]
    fn test_resolve_exact() {
        let dict = sample_dict();
        let entry = dict.resolve("Cardiac Surgery").unwrap();
        assert_eq!(entry.code, "P1");
        assert_eq!(entry.display, "Cardiac surgery");
    }

    #[test]
    fn test_resolve_normalizes_case_and_whitespace() {
        let dict = sample_dict();
        let canonical = dict.resolve("Cardiac Surgery").unwrap();
        let messy = dict.resolve("  cardiac   SURGERY ").unwrap();
        assert_eq!(canonical, messy);
    }

    #[test]
    fn test_no_match_is_none_not_error() {
        let dict = sample_dict();
        assert!(dict.resolve("Robotic Surgery").is_none());
        assert!(dict.resolve("").is_none());
    }

    #[test]
    fn test_from_json_shape() {
        let dict = TerminologyDict::from_json(
            r#"{"system": "http://snomed.info/sct",
                "concepts": {"Ambulance": {"code": "49122002", "display": "Ambulance"}}}"#,
        )
        .unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.resolve("ambulance").unwrap().code, "49122002");
    }

    #[test]
    fn test_from_json_rejects_empty_system() {
        let result = TerminologyDict::from_json(r#"{"system": " ", "concepts": {}}"#);
        assert!(matches!(result, Err(TerminologyError::MissingSystem)));
    }

    #[test]
    fn test_builtin_loads_and_resolves() {
        let dict = TerminologyDict::builtin();
        assert!(!dict.is_empty());
        let entry = dict.resolve("cardiac surgery").unwrap();
        assert_eq!(entry.system, "http://snomed.info/sct");
    }
}
