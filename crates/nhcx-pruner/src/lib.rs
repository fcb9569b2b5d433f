//! NHCX Policy Pruner
//!
//! Removes boilerplate sections from extracted policy text before it is sent
//! to the extraction LLM. Sections are delimited by markdown ATX headings;
//! each heading is classified against a static discard-pattern set by
//! case-insensitive substring match, and matching sections are dropped
//! heading and body both. Everything else passes through verbatim, in order.
//!
//! Pruning is a pure function of the input text and the pattern set - no
//! side effects, no runtime mutation of the patterns. A document with no
//! recognized headings is returned unchanged.
//!
//! Sub-headings are classified independently of their parents: a
//! boilerplate sub-section under a substantive heading is still dropped,
//! and a substantive sub-section under a dropped heading is kept.
//!
//! # Examples
//!
//! ```
//! use nhcx_pruner::PolicyPruner;
//!
//! let pruner = PolicyPruner::default();
//! let reduced = pruner.prune("# Benefits\nCovered.\n# Table of Contents\n1. ...\n");
//! assert!(reduced.contains("Covered."));
//! assert!(!reduced.contains("Table of Contents"));
//! ```

#![warn(missing_docs)]

mod config;
mod pruner;

pub use config::PrunerConfig;
pub use pruner::PolicyPruner;
