//! The validation checklist

use std::collections::HashSet;

use nhcx_domain::fhir::{codes, Bundle, BundleType, InsurancePlan, Reference};
use tracing::debug;

use crate::{Issue, IssueCode, Severity};

/// Inspect a bundle and report every issue found
///
/// Checks are independent; all of them run on every call. The returned list
/// is sorted error > warning > info, with bundle traversal order preserved
/// inside each severity class. An empty list means the bundle is clean.
pub fn validate(bundle: &Bundle) -> Vec<Issue> {
    let mut issues = Vec::new();

    check_bundle_envelope(bundle, &mut issues);
    check_resource_set(bundle, &mut issues);

    if let Some(plan) = bundle.insurance_plan() {
        let known_refs = local_references(bundle);
        check_plan_references(plan, &known_refs, &mut issues);
        check_plan_fields(plan, &mut issues);
        check_coverages(plan, &mut issues);
        check_costs(plan, &mut issues);
        report_counts(plan, &mut issues);
    }

    // Stable sort: severity classes separate, traversal order kept within.
    issues.sort_by_key(|issue| issue.severity);

    debug!(count = issues.len(), "bundle validated");
    issues
}

fn check_bundle_envelope(bundle: &Bundle, issues: &mut Vec<Issue>) {
    if bundle.resource_type != "Bundle" {
        issues.push(Issue::new(
            Severity::Error,
            IssueCode::WrongResourceType,
            "resourceType",
            format!("must be 'Bundle', found '{}'", bundle.resource_type),
        ));
    }
    if bundle.type_ != BundleType::Collection {
        issues.push(Issue::new(
            Severity::Warning,
            IssueCode::WrongBundleType,
            "type",
            "expected bundle type 'collection'",
        ));
    }
}

fn check_resource_set(bundle: &Bundle, issues: &mut Vec<Issue>) {
    let plan_count = bundle
        .resources()
        .filter(|r| r.type_name() == "InsurancePlan")
        .count();
    if plan_count == 0 {
        issues.push(Issue::new(
            Severity::Error,
            IssueCode::MissingResource,
            "entry",
            "no InsurancePlan resource found in bundle",
        ));
    } else if plan_count > 1 {
        issues.push(Issue::new(
            Severity::Error,
            IssueCode::MissingResource,
            "entry",
            format!("expected exactly one InsurancePlan, found {plan_count}"),
        ));
    }

    if bundle.organizations().count() == 0 {
        issues.push(Issue::new(
            Severity::Error,
            IssueCode::MissingResource,
            "entry",
            "no Organization resource found in bundle",
        ));
    }

    let mut seen = HashSet::new();
    for (index, resource) in bundle.resources().enumerate() {
        if !seen.insert(resource.id()) {
            issues.push(Issue::new(
                Severity::Error,
                IssueCode::DuplicateResourceId,
                format!("entry[{index}].resource.id"),
                format!("duplicate resource id '{}'", resource.id()),
            ));
        }
    }
}

/// All `urn:uuid:` URLs that resolve inside this bundle
fn local_references(bundle: &Bundle) -> HashSet<String> {
    bundle
        .resources()
        .map(|resource| format!("{}{}", codes::FULL_URL_PREFIX, resource.id()))
        .collect()
}

fn check_plan_references(
    plan: &InsurancePlan,
    known_refs: &HashSet<String>,
    issues: &mut Vec<Issue>,
) {
    check_reference(
        plan.owned_by.as_ref(),
        "InsurancePlan.ownedBy",
        known_refs,
        issues,
    );
    if plan.owned_by.is_none() {
        issues.push(Issue::new(
            Severity::Error,
            IssueCode::MissingField,
            "InsurancePlan.ownedBy",
            "plan has no owning (insurer) organization reference",
        ));
    }
    check_reference(
        plan.administered_by.as_ref(),
        "InsurancePlan.administeredBy",
        known_refs,
        issues,
    );
    for (index, network) in plan.network.iter().enumerate() {
        check_reference(
            Some(network),
            &format!("InsurancePlan.network[{index}]"),
            known_refs,
            issues,
        );
    }
}

fn check_reference(
    reference: Option<&Reference>,
    path: &str,
    known_refs: &HashSet<String>,
    issues: &mut Vec<Issue>,
) {
    let Some(target) = reference.and_then(|r| r.reference.as_ref()) else {
        return;
    };
    if !known_refs.contains(target) {
        issues.push(Issue::new(
            Severity::Error,
            IssueCode::DanglingReference,
            path,
            format!("reference '{target}' does not resolve within the bundle"),
        ));
    }
}

fn check_plan_fields(plan: &InsurancePlan, issues: &mut Vec<Issue>) {
    if plan.name.as_deref().map_or(true, str::is_empty) {
        issues.push(Issue::new(
            Severity::Error,
            IssueCode::MissingField,
            "InsurancePlan.name",
            "required field 'name' is missing or empty",
        ));
    }
    if plan.status.as_deref().map_or(true, str::is_empty) {
        issues.push(Issue::new(
            Severity::Error,
            IssueCode::MissingField,
            "InsurancePlan.status",
            "required field 'status' is missing or empty",
        ));
    }
    if plan.meta.as_ref().map_or(true, |m| m.profile.is_empty()) {
        issues.push(Issue::new(
            Severity::Warning,
            IssueCode::MissingProfile,
            "InsurancePlan.meta.profile",
            "no profile URL set on InsurancePlan",
        ));
    }
    if plan.text.is_none() {
        issues.push(Issue::new(
            Severity::Info,
            IssueCode::NoNarrative,
            "InsurancePlan.text",
            "narrative text is absent",
        ));
    }
}

fn check_coverages(plan: &InsurancePlan, issues: &mut Vec<Issue>) {
    if plan.coverage.is_empty() {
        issues.push(Issue::new(
            Severity::Warning,
            IssueCode::NoCoverage,
            "InsurancePlan.coverage",
            "plan declares no coverage groups",
        ));
        return;
    }

    for (c, coverage) in plan.coverage.iter().enumerate() {
        for (b, benefit) in coverage.benefit.iter().enumerate() {
            for (l, limit) in benefit.limit.iter().enumerate() {
                let value = limit.value.as_ref().and_then(|quantity| quantity.value);
                if let Some(value) = value {
                    if value < 0.0 {
                        issues.push(Issue::new(
                            Severity::Error,
                            IssueCode::NegativeLimit,
                            format!(
                                "InsurancePlan.coverage[{c}].benefit[{b}].limit[{l}].value"
                            ),
                            format!("benefit limit has negative value {value}"),
                        ));
                    }
                }
            }
        }
    }
}

fn check_costs(plan: &InsurancePlan, issues: &mut Vec<Issue>) {
    for (p, sub_plan) in plan.plan.iter().enumerate() {
        for (s, cost) in sub_plan.specific_cost.iter().enumerate() {
            let code = cost
                .applicability
                .as_ref()
                .and_then(|concept| concept.coding.first())
                .and_then(|coding| coding.code.as_deref());
            let recognized = matches!(code, Some("in-network") | Some("out-of-network"));
            if !recognized {
                issues.push(Issue::new(
                    Severity::Warning,
                    IssueCode::UnspecifiedApplicability,
                    format!("InsurancePlan.plan[{p}].specificCost[{s}].applicability"),
                    "cost entry applicability is unspecified",
                ));
            }
        }
    }
}

fn report_counts(plan: &InsurancePlan, issues: &mut Vec<Issue>) {
    issues.push(Issue::new(
        Severity::Info,
        IssueCode::NetworkCount,
        "InsurancePlan.network",
        format!("plan references {} provider network(s)", plan.network.len()),
    ));
    issues.push(Issue::new(
        Severity::Info,
        IssueCode::CoverageCount,
        "InsurancePlan.coverage",
        format!("plan declares {} coverage group(s)", plan.coverage.len()),
    ));
    let benefit_count: usize = plan
        .coverage
        .iter()
        .map(|coverage| coverage.benefit.len())
        .sum();
    issues.push(Issue::new(
        Severity::Info,
        IssueCode::BenefitCount,
        "InsurancePlan.coverage",
        format!("plan declares {benefit_count} benefit(s)"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use nhcx_domain::fhir::{
        Benefit, CodeableConcept, Coverage, Limit, Meta, Narrative, Organization, PlanComponent,
        Quantity, Resource, SpecificCost,
    };

    /// A structurally clean bundle: insurer org + plan referencing it
    fn clean_bundle() -> Bundle {
        let insurer = Organization::named("org-1", "Acme Health");
        let plan = InsurancePlan {
            id: "plan-1".to_string(),
            meta: Some(Meta::profiled(codes::PROFILE_INSURANCE_PLAN)),
            text: Some(Narrative::generated("A plan.")),
            status: Some(codes::STATUS_ACTIVE.to_string()),
            name: Some("Acme Care".to_string()),
            owned_by: Some(Reference::local("org-1")),
            coverage: vec![Coverage {
                type_: CodeableConcept::text_only("Hospitalization"),
                extension: Vec::new(),
                benefit: vec![Benefit {
                    type_: CodeableConcept::text_only("Room Rent"),
                    limit: vec![Limit {
                        value: Some(Quantity {
                            value: Some(5000.0),
                            unit: Some("INR".to_string()),
                        }),
                        code: None,
                    }],
                }],
            }],
            ..Default::default()
        };
        let mut bundle = Bundle::collection("b-1");
        bundle.push(Resource::Organization(insurer));
        bundle.push(Resource::InsurancePlan(plan));
        bundle
    }

    fn errors(issues: &[Issue]) -> Vec<&Issue> {
        issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .collect()
    }

    fn warnings(issues: &[Issue]) -> Vec<&Issue> {
        issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect()
    }

    #[test]
    fn test_clean_bundle_has_no_errors_or_warnings() {
        let issues = validate(&clean_bundle());
        assert!(errors(&issues).is_empty(), "unexpected: {issues:?}");
        assert!(warnings(&issues).is_empty(), "unexpected: {issues:?}");
    }

    #[test]
    fn test_empty_bundle_reports_missing_resources() {
        let issues = validate(&Bundle::collection("b-1"));
        let errors = errors(&issues);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|i| i.code == IssueCode::MissingResource));
    }

    #[test]
    fn test_dangling_reference_detected() {
        let mut bundle = clean_bundle();
        if let Resource::InsurancePlan(plan) = &mut bundle.entry[1].resource {
            plan.network.push(Reference::local("org-does-not-exist"));
        }
        let issues = validate(&bundle);
        let errors = errors(&issues);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, IssueCode::DanglingReference);
        assert_eq!(errors[0].path, "InsurancePlan.network[0]");
    }

    #[test]
    fn test_duplicate_resource_id_detected() {
        let mut bundle = clean_bundle();
        bundle.push(Resource::Organization(Organization::named(
            "org-1",
            "Duplicate Org",
        )));
        let issues = validate(&bundle);
        assert!(errors(&issues)
            .iter()
            .any(|i| i.code == IssueCode::DuplicateResourceId));
    }

    #[test]
    fn test_negative_limit_is_exactly_one_error() {
        let mut bundle = clean_bundle();
        if let Resource::InsurancePlan(plan) = &mut bundle.entry[1].resource {
            plan.coverage[0].benefit[0].limit[0]
                .value
                .as_mut()
                .unwrap()
                .value = Some(-500.0);
        }
        let issues = validate(&bundle);
        let errors = errors(&issues);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, IssueCode::NegativeLimit);
        assert_eq!(
            errors[0].path,
            "InsurancePlan.coverage[0].benefit[0].limit[0].value"
        );
    }

    #[test]
    fn test_zero_coverage_is_exactly_one_warning_zero_errors() {
        let mut bundle = clean_bundle();
        if let Resource::InsurancePlan(plan) = &mut bundle.entry[1].resource {
            plan.coverage.clear();
        }
        let issues = validate(&bundle);
        assert!(errors(&issues).is_empty());
        let warnings = warnings(&issues);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, IssueCode::NoCoverage);
    }

    #[test]
    fn test_unspecified_applicability_warns() {
        let mut bundle = clean_bundle();
        if let Resource::InsurancePlan(plan) = &mut bundle.entry[1].resource {
            plan.plan.push(PlanComponent {
                specific_cost: vec![SpecificCost {
                    applicability: Some(CodeableConcept::coded(
                        codes::SYS_APPLICABILITY,
                        "unspecified",
                        "Unspecified",
                    )),
                    ..Default::default()
                }],
                ..Default::default()
            });
        }
        let issues = validate(&bundle);
        assert!(warnings(&issues)
            .iter()
            .any(|i| i.code == IssueCode::UnspecifiedApplicability));
    }

    #[test]
    fn test_recognized_applicability_does_not_warn() {
        let mut bundle = clean_bundle();
        if let Resource::InsurancePlan(plan) = &mut bundle.entry[1].resource {
            plan.plan.push(PlanComponent {
                specific_cost: vec![SpecificCost {
                    applicability: Some(CodeableConcept::coded(
                        codes::SYS_APPLICABILITY,
                        "in-network",
                        "In Network",
                    )),
                    ..Default::default()
                }],
                ..Default::default()
            });
        }
        assert!(warnings(&validate(&bundle)).is_empty());
    }

    #[test]
    fn test_issues_sorted_errors_before_warnings_before_info() {
        let mut bundle = clean_bundle();
        if let Resource::InsurancePlan(plan) = &mut bundle.entry[1].resource {
            plan.meta = None;
            plan.network.push(Reference::local("nowhere"));
        }
        let issues = validate(&bundle);
        let severities: Vec<Severity> = issues.iter().map(|i| i.severity).collect();
        let mut sorted = severities.clone();
        sorted.sort();
        assert_eq!(severities, sorted);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_info_counts_always_reported() {
        let issues = validate(&clean_bundle());
        let infos: Vec<&Issue> = issues
            .iter()
            .filter(|i| i.severity == Severity::Info)
            .collect();
        assert!(infos.iter().any(|i| i.code == IssueCode::NetworkCount));
        assert!(infos.iter().any(|i| i.code == IssueCode::CoverageCount));
        assert!(infos.iter().any(|i| i.code == IssueCode::BenefitCount));
    }

    #[test]
    fn test_missing_plan_name_is_error() {
        let mut bundle = clean_bundle();
        if let Resource::InsurancePlan(plan) = &mut bundle.entry[1].resource {
            plan.name = None;
        }
        let issues = validate(&bundle);
        assert!(errors(&issues)
            .iter()
            .any(|i| i.code == IssueCode::MissingField && i.path == "InsurancePlan.name"));
    }

    #[test]
    fn test_wrong_resource_type_is_error() {
        let mut bundle = clean_bundle();
        bundle.resource_type = "Basket".to_string();
        let issues = validate(&bundle);
        assert!(errors(&issues)
            .iter()
            .any(|i| i.code == IssueCode::WrongResourceType));
    }
}
