//! Pruner configuration

use serde::{Deserialize, Serialize};

/// Discard-pattern configuration for the pruner
///
/// Patterns are matched case-insensitively as substrings of heading text.
/// The default set covers the boilerplate found across retail health policy
/// wordings; deployments extend it per insurer via TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrunerConfig {
    /// Heading patterns whose sections are dropped entirely
    pub discard_headings: Vec<String>,
}

impl Default for PrunerConfig {
    fn default() -> Self {
        Self {
            discard_headings: [
                "table of contents",
                "contents",
                "glossary",
                "definitions",
                "arbitration",
                "disclaimer",
                "legal notice",
                "jurisdiction",
                "governing law",
                "signature",
                "in witness whereof",
                "annexure",
                "grievance redressal",
                "stamp duty",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl PrunerConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
