//! NHCX Terminology Resolver
//!
//! Maps free-text clinical/benefit terms to coded SNOMED CT concepts.
//!
//! The dictionary is loaded once at process start, is immutable for the
//! process lifetime, and is safe for unbounded concurrent reads. Lookup is
//! exact-match on a normalized key (case-folded, whitespace-collapsed) -
//! no fuzzy matching, no partial scoring. A caller that gets no match falls
//! back to uncoded free text; resolution itself never fails.
//!
//! # Examples
//!
//! ```
//! use nhcx_terminology::TerminologyDict;
//!
//! let dict = TerminologyDict::builtin();
//! let entry = dict.resolve("  cardiac SURGERY ").unwrap();
//! assert_eq!(entry.system, "http://snomed.info/sct");
//! ```

#![warn(missing_docs)]

mod dict;
mod error;

pub use dict::TerminologyDict;
pub use error::TerminologyError;
