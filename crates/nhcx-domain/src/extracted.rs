//! Intermediate representation filled in by the extraction LLM
//!
//! The schema template guarantees that every key below is present in the
//! raw JSON; none of the *values* are guaranteed. Absence is always `null`
//! or an empty list, so every leaf here is an `Option` or a `Vec`. Shape
//! enforcement happens once, at the ingress boundary (`nhcx-schema`) - by
//! the time a value of this type exists, the mapper may assume it is
//! well-formed.

use serde::{Deserialize, Serialize};

/// Everything the LLM extracted from one policy document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractedPolicyData {
    /// The insuring organization (required to be non-null for mapping)
    pub insurer: Option<OrganizationData>,

    /// Third-party administrator, if the policy names one
    pub tpa: Option<OrganizationData>,

    /// The insurance plan body
    pub plan: Option<PlanData>,
}

/// Identity and contact fields for an insurer or TPA
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct OrganizationData {
    /// Organization name as printed on the policy
    pub name: Option<String>,

    /// Regulator-registry (IRDAI) registration number, when stated
    pub registry_id: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Contact email address
    pub email: Option<String>,

    /// Public website
    pub website: Option<String>,
}

/// Plan identity, structure and attachments
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PlanData {
    /// Marketed plan name
    pub name: Option<String>,

    /// Plan type code, if the document states one
    pub type_code: Option<String>,

    /// Plan type display text
    pub type_display: Option<String>,

    /// Alternate names for the plan, in document order
    pub aliases: Vec<String>,

    /// Coverage period start (ISO date as printed)
    pub period_start: Option<String>,

    /// Coverage period end
    pub period_end: Option<String>,

    /// Named provider networks
    pub networks: Vec<String>,

    /// Helpline / claims contacts
    pub contacts: Vec<ContactData>,

    /// Geographic coverage areas
    pub coverage_area: Vec<String>,

    /// Coverage groups with their benefits
    pub coverages: Vec<CoverageData>,

    /// Policy exclusions
    pub exclusions: Vec<ExclusionData>,

    /// Documents required to support a claim
    pub supporting_documents: Vec<SupportingDocData>,

    /// Sub-plans (Individual, Family Floater, ...) with their costs
    pub sub_plans: Vec<SubPlanData>,
}

/// One coverage group (e.g. "Inpatient Care")
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverageData {
    /// Coverage group name
    pub name: Option<String>,

    /// Qualifying condition text ("Subject to sum insured")
    pub condition: Option<String>,

    /// Benefits within this coverage group
    pub benefits: Vec<BenefitData>,
}

/// One covered benefit within a coverage group
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenefitData {
    /// Free-text clinical/benefit category term ("Cardiac Surgery")
    pub category: Option<String>,

    /// Quantified caps on this benefit
    pub limits: Vec<LimitData>,
}

/// A quantified cap on a benefit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitData {
    /// Numeric magnitude of the cap
    pub value: Option<f64>,

    /// Declared unit ("currency", "days", "percent", ...)
    pub unit: Option<String>,
}

/// A policy exclusion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExclusionData {
    /// Exclusion category ("Pre-Existing Diseases")
    pub category: Option<String>,

    /// Full exclusion statement from the document
    pub statement: Option<String>,
}

/// A supporting-document requirement for claims
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupportingDocData {
    /// Requirement category ("Proof of Identity")
    pub category: Option<String>,

    /// Accepted document ("Aadhaar Card")
    pub document: Option<String>,
}

/// A helpline or claims contact on the plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactData {
    /// Contact purpose ("Claims Helpline")
    pub purpose: Option<String>,

    /// Contact name
    pub name: Option<String>,

    /// Phone number
    pub phone: Option<String>,

    /// Email address
    pub email: Option<String>,
}

/// A declared sub-plan with its cost entries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SubPlanData {
    /// Sub-plan type text ("Individual", "Family Floater", ...)
    pub plan_type: Option<String>,

    /// Cost entries for this sub-plan
    pub costs: Vec<CostData>,
}

/// One cost entry under a sub-plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostData {
    /// What the cost is for ("Ambulance charges")
    pub description: Option<String>,

    /// Monetary or percentage magnitude
    pub value: Option<f64>,

    /// Declared unit ("currency", "percent", ...)
    pub unit: Option<String>,

    /// Network applicability text ("in-network", "out-of-network")
    pub applicability: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_leaves_deserialize_to_none() {
        let raw = r#"{
            "insurer": {"name": null, "registryId": null, "phone": null, "email": null, "website": null},
            "tpa": null,
            "plan": null
        }"#;
        let data: ExtractedPolicyData = serde_json::from_str(raw).unwrap();
        let insurer = data.insurer.unwrap();
        assert_eq!(insurer.name, None);
        assert!(data.tpa.is_none());
        assert!(data.plan.is_none());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let raw = r#"{"insurer": null, "tpa": null, "plan": null, "invented": 1}"#;
        let result = serde_json::from_str::<ExtractedPolicyData>(raw);
        assert!(result.is_err());
    }

    #[test]
    fn test_nested_lists_default_to_empty() {
        let raw = r#"{"insurer": null, "tpa": null, "plan": {"name": "X"}}"#;
        let data: ExtractedPolicyData = serde_json::from_str(raw).unwrap();
        let plan = data.plan.unwrap();
        assert_eq!(plan.name.as_deref(), Some("X"));
        assert!(plan.coverages.is_empty());
        assert!(plan.sub_plans.is_empty());
    }
}
