//! Closed vocabularies used when mapping loosely-worded input
//!
//! Each enum parses from whatever free text the extraction produced and
//! falls back to an explicit "unknown" member. A wrong financial unit is a
//! worse failure than a declared unknown, so none of these guess.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Unit of a benefit limit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitUnit {
    /// Monetary amount (INR unless the document says otherwise)
    Currency,
    /// Count of days (room rent caps, pre/post hospitalization windows)
    DayCount,
    /// Percentage of the sum insured
    Percentage,
    /// Declared unit missing or unrecognized
    Unspecified,
}

impl LimitUnit {
    /// Classify a declared unit string; `None` or unrecognized text maps to
    /// [`LimitUnit::Unspecified`].
    pub fn parse(unit: Option<&str>) -> Self {
        let Some(unit) = unit else {
            return Self::Unspecified;
        };
        match unit.trim().to_lowercase().as_str() {
            "currency" | "inr" | "rs" | "rs." | "rupees" | "amount" => Self::Currency,
            "day" | "days" | "day-count" => Self::DayCount,
            "%" | "percent" | "percentage" => Self::Percentage,
            _ => Self::Unspecified,
        }
    }

    /// Wire code for the unit tag
    pub fn code(&self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::DayCount => "day-count",
            Self::Percentage => "percentage",
            Self::Unspecified => "unspecified",
        }
    }
}

impl Display for LimitUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Currency => write!(f, "Currency"),
            Self::DayCount => write!(f, "Day Count"),
            Self::Percentage => write!(f, "Percentage"),
            Self::Unspecified => write!(f, "Unspecified"),
        }
    }
}

/// Network applicability of a cost entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostApplicability {
    /// Applies within the plan's provider networks
    InNetwork,
    /// Applies outside the plan's provider networks
    OutOfNetwork,
    /// Document did not say
    Unspecified,
}

impl CostApplicability {
    /// Classify an applicability string; absent or unrecognized text maps to
    /// [`CostApplicability::Unspecified`].
    pub fn parse(applicability: Option<&str>) -> Self {
        let Some(text) = applicability else {
            return Self::Unspecified;
        };
        let normalized = text.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "in-network" | "network" | "cashless" => Self::InNetwork,
            "out-of-network" | "non-network" | "reimbursement" => Self::OutOfNetwork,
            _ => Self::Unspecified,
        }
    }

    /// Wire code for the applicability tag
    pub fn code(&self) -> &'static str {
        match self {
            Self::InNetwork => "in-network",
            Self::OutOfNetwork => "out-of-network",
            Self::Unspecified => "unspecified",
        }
    }
}

impl Display for CostApplicability {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InNetwork => write!(f, "In Network"),
            Self::OutOfNetwork => write!(f, "Out Of Network"),
            Self::Unspecified => write!(f, "Unspecified"),
        }
    }
}

/// Sub-plan type enumeration
///
/// Unrecognized type strings map to [`SubPlanType::Other`]; a declared
/// sub-plan is never rejected over its type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubPlanType {
    /// Covers one insured person
    Individual,
    /// One sum insured floating over a family
    FamilyFloater,
    /// Anything else the document declared
    Other,
}

impl SubPlanType {
    /// Classify a sub-plan type string
    pub fn parse(plan_type: Option<&str>) -> Self {
        let Some(text) = plan_type else {
            return Self::Other;
        };
        let normalized = text.trim().to_lowercase();
        if normalized.contains("individual") {
            Self::Individual
        } else if normalized.contains("family") || normalized.contains("floater") {
            Self::FamilyFloater
        } else {
            Self::Other
        }
    }

    /// Wire code for the plan-type tag
    pub fn code(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::FamilyFloater => "family-floater",
            Self::Other => "other",
        }
    }
}

impl Display for SubPlanType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Individual => write!(f, "Individual"),
            Self::FamilyFloater => write!(f, "Family Floater"),
            Self::Other => write!(f, "Other"),
        }
    }
}
