//! NHCX Domain Layer
//!
//! This crate contains the core data model for the nhcx-bundler pipeline.
//! It defines the shapes that every other layer agrees on, and nothing else:
//! no I/O, no LLM calls, no validation policy.
//!
//! ## Key Concepts
//!
//! - **ExtractedPolicyData**: the intermediate representation an LLM fills in
//!   from a pruned policy document; every leaf is optional
//! - **FHIR resources**: the output side - `Bundle`, `Organization` and
//!   `InsurancePlan` shapes serialized bit-exactly for an NHCX consumer
//! - **TerminologyEntry**: a coded concept resolved from a free-text term
//! - **Vocabulary enums**: closed sets for limit units, cost applicability
//!   and sub-plan types - unrecognized input degrades, it never rejects
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Only `serde` as an external dependency (the bundle IS a JSON surface)
//! - Pure data shapes and conversions only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for the LLM boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod extracted;
pub mod fhir;
pub mod terminology;
pub mod traits;
pub mod vocab;

// Re-exports for convenience
pub use extracted::{
    BenefitData, ContactData, CostData, CoverageData, ExclusionData, ExtractedPolicyData,
    LimitData, OrganizationData, PlanData, SubPlanData, SupportingDocData,
};
pub use terminology::TerminologyEntry;
pub use vocab::{CostApplicability, LimitUnit, SubPlanType};
