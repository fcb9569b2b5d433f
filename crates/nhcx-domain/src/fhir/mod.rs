//! FHIR R4 resource shapes for the output bundle
//!
//! Field names, cardinalities and fixed code values here are the bit-exact
//! compatibility surface consumed by a claims exchange. Serialization must
//! not be changed casually: camelCase field names, `resourceType` tags,
//! `urn:uuid:` full URLs and the system URIs in [`codes`] are all part of
//! the contract.

pub mod bundle;
pub mod codes;
pub mod datatypes;
pub mod insurance_plan;
pub mod organization;

pub use bundle::{Bundle, BundleEntry, BundleType, Resource};
pub use datatypes::{
    CodeableConcept, Coding, ContactPoint, Extension, HumanName, Identifier, Meta, Narrative,
    Period, Quantity, Reference,
};
pub use insurance_plan::{
    Benefit, Coverage, InsurancePlan, Limit, PlanComponent, PlanContact, SpecificCost,
};
pub use organization::Organization;
