//! InsurancePlan resource shape
//!
//! The central resource of every bundle. It owns references to the insurer,
//! TPA and network organizations (never copies), ordered coverage groups,
//! extension records and sub-plans with their costs.

use serde::{Deserialize, Serialize};

use super::datatypes::{
    CodeableConcept, ContactPoint, Extension, HumanName, Identifier, Meta, Narrative, Period,
    Quantity, Reference,
};

/// The InsurancePlan resource
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsurancePlan {
    /// Bundle-unique resource id
    pub id: String,

    /// Profile metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Generated narrative summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    /// Locale tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Plan status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Marketed plan name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Alternate names, input order preserved, exact duplicates dropped
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alias: Vec<String>,

    /// Business identifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    /// Plan type tags
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub type_: Vec<CodeableConcept>,

    /// Coverage period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Reference to the insurer organization in the same bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<Reference>,

    /// Reference to the TPA organization, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administered_by: Option<Reference>,

    /// Geographic coverage areas (display-only references)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coverage_area: Vec<Reference>,

    /// Helpline / claims contacts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<PlanContact>,

    /// References to network organizations in the same bundle
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub network: Vec<Reference>,

    /// Flat extension records: exclusions, supporting-info requirements
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Coverage groups, input order preserved
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coverage: Vec<Coverage>,

    /// Sub-plans with their cost entries
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan: Vec<PlanComponent>,
}

/// A helpline or claims contact attached to the plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanContact {
    /// What the contact is for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<CodeableConcept>,

    /// Contact name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<HumanName>,

    /// Phone/email contact points
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
}

/// One coverage group within the plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Coverage {
    /// Coverage group concept
    #[serde(rename = "type")]
    pub type_: CodeableConcept,

    /// Qualifying-condition extension, when the document states one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Benefits within this group, input order preserved
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub benefit: Vec<Benefit>,
}

/// One benefit within a coverage group
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Benefit {
    /// Benefit category: SNOMED-coded when terminology resolution matched,
    /// free text only when it did not
    #[serde(rename = "type")]
    pub type_: CodeableConcept,

    /// Quantified caps on this benefit
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub limit: Vec<Limit>,
}

/// A quantified cap on a benefit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Limit {
    /// The capped quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,

    /// Unit tag: currency / day-count / percentage / unspecified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
}

/// A sub-plan entry (Individual, Family Floater, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanComponent {
    /// Sub-plan identifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    /// Sub-plan type from the closed enumeration
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// Cost entries for this sub-plan
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specific_cost: Vec<SpecificCost>,
}

/// One cost entry under a sub-plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecificCost {
    /// What the cost is for
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// Network applicability tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicability: Option<CodeableConcept>,

    /// Monetary or percentage value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_fields_serialize_camel_case() {
        let plan = InsurancePlan {
            id: "p-1".to_string(),
            owned_by: Some(Reference::local("org-1")),
            administered_by: Some(Reference::local("org-2")),
            ..Default::default()
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["ownedBy"]["reference"], "urn:uuid:org-1");
        assert_eq!(json["administeredBy"]["reference"], "urn:uuid:org-2");
        assert!(json.get("owned_by").is_none());
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        let plan = InsurancePlan {
            id: "p-1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&plan).unwrap();
        assert!(!json.contains("coverage"));
        assert!(!json.contains("alias"));
        assert!(!json.contains("extension"));
    }

    #[test]
    fn test_sub_plan_specific_cost_key() {
        let component = PlanComponent {
            specific_cost: vec![SpecificCost::default()],
            ..Default::default()
        };
        let json = serde_json::to_value(&component).unwrap();
        assert!(json.get("specificCost").is_some());
    }
}
