//! Issue types reported by validation

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// Severity of a reported issue, ordered error > warning > info
///
/// The derived ordering drives report sorting: errors sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The bundle violates the output contract
    Error,
    /// The bundle is degraded but acceptable
    Warning,
    /// Audit/summary information, never blocking
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Machine-readable issue classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    /// Root resourceType is not "Bundle"
    WrongResourceType,
    /// Bundle type is not "collection"
    WrongBundleType,
    /// A required resource is absent or not unique
    MissingResource,
    /// Two resources share one id
    DuplicateResourceId,
    /// A reference does not resolve within the bundle
    DanglingReference,
    /// A required field on a resource is absent or empty
    MissingField,
    /// No profile tag on the InsurancePlan
    MissingProfile,
    /// No generated narrative on the InsurancePlan
    NoNarrative,
    /// The plan declares no coverage groups
    NoCoverage,
    /// A benefit limit carries a negative value
    NegativeLimit,
    /// A cost entry's applicability is unspecified
    UnspecifiedApplicability,
    /// Count of provider networks
    NetworkCount,
    /// Count of coverage groups
    CoverageCount,
    /// Count of benefits across coverage groups
    BenefitCount,
}

/// One finding from bundle validation, serializable directly for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// How bad it is
    pub severity: Severity,
    /// What kind of finding this is
    pub code: IssueCode,
    /// Where in the bundle it was found
    pub path: String,
    /// Human-readable description
    pub message: String,
}

impl Issue {
    pub(crate) fn new(
        severity: Severity,
        code: IssueCode,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}] {}: {}", self.severity, self.path, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
    }

    #[test]
    fn test_issue_serializes_for_display() {
        let issue = Issue::new(
            Severity::Warning,
            IssueCode::NoCoverage,
            "InsurancePlan.coverage",
            "plan declares no coverage groups",
        );
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["code"], "no-coverage");
        assert_eq!(json["path"], "InsurancePlan.coverage");
    }
}
