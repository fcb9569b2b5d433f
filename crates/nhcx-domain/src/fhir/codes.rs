//! Fixed wire values of the output contract
//!
//! Every URI and code here is part of the published surface a downstream
//! claims exchange matches on. Change nothing without a profile bump.

/// Locale tag stamped on the bundle and the plan
pub const LANGUAGE_EN_IN: &str = "en-IN";

/// SNOMED CT coding-system URI
pub const SYS_SNOMED_CT: &str = "http://snomed.info/sct";

/// NRCES profile tag for Organization resources
pub const PROFILE_ORGANIZATION: &str =
    "https://nrces.in/ndhm/fhir/r4/StructureDefinition/Organization";

/// NRCES profile tag for the InsurancePlan resource
pub const PROFILE_INSURANCE_PLAN: &str =
    "https://nrces.in/ndhm/fhir/r4/StructureDefinition/InsurancePlan";

/// Identifier system for insurer registry (IRDAI) registration numbers
pub const SYS_IRDAI_INSURER: &str = "https://irdai.gov.in/insurers";

/// Identifier system for TPA registry (IRDAI) registration numbers
pub const SYS_IRDAI_TPA: &str = "https://irdai.gov.in/tpa";

/// HL7 organization-type code system
pub const SYS_ORGANIZATION_TYPE: &str =
    "http://terminology.hl7.org/CodeSystem/organization-type";

/// Organization-type code for provider networks
pub const ORG_TYPE_NETWORK_CODE: &str = "prov";

/// Organization-type display for provider networks
pub const ORG_TYPE_NETWORK_DISPLAY: &str = "Healthcare Provider Network";

/// Code system tagging the unit of a benefit limit
pub const SYS_BENEFIT_UNIT: &str = "http://terminology.hl7.org/CodeSystem/benefit-unit";

/// Code system tagging cost applicability
pub const SYS_APPLICABILITY: &str = "http://terminology.hl7.org/CodeSystem/applicability";

/// Value set for sub-plan types
pub const VS_PLAN_TYPE: &str = "https://nrces.in/ndhm/fhir/r4/ValueSet/ndhm-plan-type";

/// Value set for the top-level insurance-plan type
pub const VS_INSURANCE_PLAN_TYPE: &str =
    "https://nrces.in/ndhm/fhir/r4/ValueSet/ndhm-insuranceplan-type";

/// Extension URI for policy exclusions
pub const EXT_EXCLUSION: &str =
    "https://nrces.in/ndhm/fhir/r4/StructureDefinition/InsurancePlan-Exclusion";

/// Extension URI for supporting-document requirements
pub const EXT_SUPPORTING_INFO: &str =
    "https://nrces.in/ndhm/fhir/r4/StructureDefinition/InsurancePlan-SupportingInfoRequirement";

/// Extension URI for a coverage group's qualifying condition
pub const EXT_COVERAGE_CONDITION: &str =
    "https://nrces.in/ndhm/fhir/r4/StructureDefinition/InsurancePlan-CoverageCondition";

/// Identifier `use` for regulator-sourced identifiers
pub const IDENTIFIER_USE_OFFICIAL: &str = "official";

/// Fixed plan status (the current schema has no signal for anything else)
pub const STATUS_ACTIVE: &str = "active";

/// Narrative status for generated summaries
pub const NARRATIVE_GENERATED: &str = "generated";

/// Prefix for bundle-local full URLs and references
pub const FULL_URL_PREFIX: &str = "urn:uuid:";

/// ContactPoint system for phone numbers
pub const TELECOM_PHONE: &str = "phone";

/// ContactPoint system for email addresses
pub const TELECOM_EMAIL: &str = "email";

/// ContactPoint system for web URLs
pub const TELECOM_URL: &str = "url";
