//! NHCX Bundle Validator
//!
//! Pure structural inspection of a resource bundle, independent of how the
//! bundle was produced. Every check runs on every invocation; one call
//! reports every issue found, ordered error > warning > info with bundle
//! traversal order preserved within a severity class.
//!
//! The validator never fails and never mutates: an empty issue list is the
//! all-clear, there is no separate "ok" flag.
//!
//! # Examples
//!
//! ```
//! use nhcx_domain::fhir::Bundle;
//! use nhcx_validator::{validate, Severity};
//!
//! let bundle = Bundle::collection("b-1");
//! let issues = validate(&bundle);
//! assert!(issues.iter().any(|i| i.severity == Severity::Error));
//! ```

#![warn(missing_docs)]

mod issue;
mod validator;

pub use issue::{Issue, IssueCode, Severity};
pub use validator::validate;
