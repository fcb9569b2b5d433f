//! NHCX Extraction Schema
//!
//! The versioned contract between the extraction LLM and the deterministic
//! core: which keys the returned JSON must carry, what each one means, and
//! how a raw LLM response becomes a well-shaped [`ExtractedPolicyData`].
//!
//! Shape enforcement happens here, once, at the ingress boundary - not
//! scattered through the mapper. Downstream code may assume an
//! `ExtractedPolicyData` has the full key set with possibly-absent values.
//!
//! [`ExtractedPolicyData`]: nhcx_domain::ExtractedPolicyData
//!
//! # Overview
//!
//! ```text
//! pruned text ─→ PromptBuilder ─→ (LLM, external) ─→ raw response
//!                                                        │
//!                         parse_llm_response(template, response)
//!                                                        │
//!                                              ExtractedPolicyData
//! ```

#![warn(missing_docs)]

mod error;
mod parser;
mod prompt;
mod template;

pub use error::ShapeError;
pub use parser::{extract_json, parse_llm_response};
pub use prompt::PromptBuilder;
pub use template::{FieldKind, FieldSpec, SchemaTemplate};
