//! NHCX Resource Bundle Mapper
//!
//! Deterministically transforms a validated [`ExtractedPolicyData`] into a
//! FHIR collection bundle: insurer and TPA organizations, one organization
//! per provider network, and the central InsurancePlan referencing them all.
//!
//! # Guarantees
//!
//! - **Referential closure**: every reference inside the InsurancePlan
//!   resolves to a resource placed in the same bundle
//! - **No fabrication**: absent regulator identifiers are omitted, unmatched
//!   category terms stay uncoded free text, unknown units tag as
//!   "unspecified" rather than guessing a currency
//! - **Degradation over failure**: missing optional fields become omitted
//!   attributes or placeholder text; the mapper fails only when the insurer
//!   or plan body is structurally absent
//!
//! Mapping is a pure function of the extracted data, the terminology
//! dictionary, the id generator and the timestamp; with a sequential id
//! generator and a pinned timestamp it is fully reproducible.
//!
//! [`ExtractedPolicyData`]: nhcx_domain::ExtractedPolicyData
//!
//! # Examples
//!
//! ```
//! use nhcx_mapper::BundleMapper;
//! use nhcx_terminology::TerminologyDict;
//! use serde_json::json;
//!
//! let dict = TerminologyDict::builtin();
//! let raw = json!({
//!     "insurer": { "name": "Acme Health" },
//!     "tpa": null,
//!     "plan": { "name": "Acme Care", "networks": ["CityCare Hospitals"] }
//! });
//! let bundle = BundleMapper::new(&dict).map_value(&raw).unwrap();
//! assert_eq!(bundle.organizations().count(), 2);
//! ```

#![warn(missing_docs)]

mod error;
mod ids;
mod mapper;

pub use error::MappingError;
pub use ids::IdGenerator;
pub use mapper::BundleMapper;
