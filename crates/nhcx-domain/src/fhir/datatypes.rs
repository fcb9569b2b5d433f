//! Shared FHIR datatypes
//!
//! Only the fields this pipeline emits are modeled. Every struct both
//! serializes (mapper output) and deserializes (validator input), with
//! absent optionals omitted from the wire form.

use serde::{Deserialize, Serialize};

/// A single coding within a codeable concept
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Coding {
    /// Coding-system URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Concept code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human-readable display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A concept expressed as zero or more codings plus free text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeableConcept {
    /// Codings, most specific first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    /// Free-text fallback or supplement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Concept with one fully-specified coding
    pub fn coded(
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            coding: vec![Coding {
                system: Some(system.into()),
                code: Some(code.into()),
                display: Some(display.into()),
            }],
            text: None,
        }
    }

    /// Concept carrying free text only - used when terminology resolution
    /// found no match and a code must not be fabricated
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            coding: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Attach or replace the free-text rendering
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A business identifier on a resource
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Identifier {
    /// Identifier use ("official")
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,

    /// Namespace the value is unique within
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The identifier value itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Identifier {
    /// An `official`-use identifier in the given system
    pub fn official(system: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            use_: Some(super::codes::IDENTIFIER_USE_OFFICIAL.to_string()),
            system: Some(system.into()),
            value: Some(value.into()),
        }
    }
}

/// A reference from one resource to another
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    /// Target, as a bundle-local `urn:uuid:` URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Display text for the target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// Reference to a resource id already placed in the same bundle
    pub fn local(id: &str) -> Self {
        Self {
            reference: Some(format!("{}{}", super::codes::FULL_URL_PREFIX, id)),
            display: None,
        }
    }

    /// Attach display text
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Display-only reference (no resolvable target)
    pub fn display_only(display: impl Into<String>) -> Self {
        Self {
            reference: None,
            display: Some(display.into()),
        }
    }
}

/// A measured or counted amount
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Quantity {
    /// Numeric magnitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Unit display text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A time period with textual ISO dates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    /// Period start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    /// Period end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// A phone/email/url contact point
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPoint {
    /// Contact system ("phone", "email", "url")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The contact detail itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ContactPoint {
    /// Contact point with the given system and value
    pub fn new(system: &str, value: impl Into<String>) -> Self {
        Self {
            system: Some(system.to_string()),
            value: Some(value.into()),
        }
    }
}

/// A flat extension: one type URI, one description
///
/// Exclusions and supporting-info requirements attach this way; nested
/// sub-extensions are deliberately not modeled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Extension {
    /// Extension-type URI
    pub url: String,

    /// Description payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
}

impl Extension {
    /// Flat `(type, description)` extension
    pub fn new(url: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            value_string: Some(value.into()),
        }
    }
}

/// Resource metadata (profile tags)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    /// Profiles the resource claims conformance to
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profile: Vec<String>,
}

impl Meta {
    /// Meta carrying a single profile tag
    pub fn profiled(profile: &str) -> Self {
        Self {
            profile: vec![profile.to_string()],
        }
    }
}

/// A generated human-readable narrative
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Narrative {
    /// Narrative status ("generated")
    pub status: String,

    /// XHTML div content
    pub div: String,
}

impl Narrative {
    /// Wrap plain text into a generated XHTML narrative, escaping markup
    pub fn generated(text: &str) -> Self {
        let safe = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        Self {
            status: super::codes::NARRATIVE_GENERATED.to_string(),
            div: format!(r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>{safe}</p></div>"#),
        }
    }
}

/// A human name rendered as text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanName {
    /// Full name as text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_optionals_are_omitted() {
        let coding = Coding {
            system: Some("http://snomed.info/sct".to_string()),
            code: Some("P1".to_string()),
            display: None,
        };
        let json = serde_json::to_string(&coding).unwrap();
        assert!(json.contains("\"system\""));
        assert!(!json.contains("display"));
    }

    #[test]
    fn test_identifier_use_renames() {
        let id = Identifier::official("https://irdai.gov.in/tpa", "IRDAI/TPA/2024/001");
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json["use"], "official");
    }

    #[test]
    fn test_reference_local_prefix() {
        let reference = Reference::local("abc-123");
        assert_eq!(reference.reference.as_deref(), Some("urn:uuid:abc-123"));
    }

    #[test]
    fn test_narrative_escapes_markup() {
        let narrative = Narrative::generated("Acme <Health> & Sons");
        assert!(narrative.div.contains("Acme &lt;Health&gt; &amp; Sons"));
        assert_eq!(narrative.status, "generated");
    }

    #[test]
    fn test_text_only_concept_has_no_coding() {
        let concept = CodeableConcept::text_only("Robotic Surgery");
        assert!(concept.coding.is_empty());
        let json = serde_json::to_string(&concept).unwrap();
        assert!(!json.contains("coding"));
    }
}
