//! Bundle construction from extracted policy data

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use nhcx_domain::extracted::{
    BenefitData, ContactData, CostData, CoverageData, ExtractedPolicyData, LimitData,
    OrganizationData, PlanData, SubPlanData,
};
use nhcx_domain::fhir::{
    codes, Benefit, Bundle, CodeableConcept, Coding, ContactPoint, Coverage, Extension, HumanName,
    Identifier, InsurancePlan, Limit, Meta, Narrative, Organization, Period, PlanComponent,
    PlanContact, Quantity, Reference, Resource, SpecificCost,
};
use nhcx_domain::{CostApplicability, LimitUnit, SubPlanType};
use nhcx_schema::SchemaTemplate;
use nhcx_terminology::TerminologyDict;

use crate::{IdGenerator, MappingError};

/// Placeholder for required-for-display text the document never yielded
const UNKNOWN: &str = "Unknown";

/// Maps extracted policy data into a FHIR collection bundle
///
/// One mapper maps one request. The terminology dictionary is injected and
/// only read; the id generator and timestamp are injectable so tests get
/// fully reproducible output.
pub struct BundleMapper<'a> {
    terminology: &'a TerminologyDict,
    template: SchemaTemplate,
    ids: IdGenerator,
    timestamp: Option<String>,
}

impl<'a> BundleMapper<'a> {
    /// Create a mapper over the given dictionary
    pub fn new(terminology: &'a TerminologyDict) -> Self {
        Self {
            terminology,
            template: SchemaTemplate::v1(),
            ids: IdGenerator::random(),
            timestamp: None,
        }
    }

    /// Replace the id generator (sequential mode for reproducible tests)
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Pin the bundle timestamp instead of reading the clock
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Validate a raw extracted document against the schema template, then
    /// map it
    pub fn map_value(&mut self, raw: &Value) -> Result<Bundle, MappingError> {
        let data = self.template.parse(raw)?;
        self.map(&data)
    }

    /// Map validated extracted data into a bundle
    ///
    /// Fails only when the insurer or plan body is structurally absent; any
    /// missing optional field degrades to an omitted attribute or
    /// placeholder text.
    pub fn map(&mut self, data: &ExtractedPolicyData) -> Result<Bundle, MappingError> {
        let insurer_data = data.insurer.as_ref().ok_or(MappingError::MissingInsurer)?;
        let plan_data = data.plan.as_ref().ok_or(MappingError::MissingPlan)?;

        // Step 1: insurer and TPA organizations.
        let insurer = self.build_organization(insurer_data, codes::SYS_IRDAI_INSURER);
        let tpa = data
            .tpa
            .as_ref()
            .map(|tpa_data| self.build_organization(tpa_data, codes::SYS_IRDAI_TPA));

        // Step 2: one organization per declared network, blank names skipped.
        let networks: Vec<Organization> = plan_data
            .networks
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| self.build_network(name.trim()))
            .collect();

        // Steps 3-7: the central InsurancePlan.
        let plan = self.build_plan(plan_data, &insurer, tpa.as_ref(), &networks);

        // Step 8: wrap everything, in the fixed submission order.
        let mut bundle = Bundle::collection(self.ids.fresh());
        bundle.timestamp = Some(self.timestamp.clone().unwrap_or_else(now_rfc3339));
        bundle.push(Resource::Organization(insurer));
        if let Some(tpa) = tpa {
            bundle.push(Resource::Organization(tpa));
        }
        for network in networks {
            bundle.push(Resource::Organization(network));
        }
        bundle.push(Resource::InsurancePlan(plan));

        debug!(entries = bundle.entry.len(), "bundle assembled");
        Ok(bundle)
    }

    /// Insurer or TPA organization; the regulator identifier is attached
    /// only when the registry field was extracted, never fabricated
    fn build_organization(
        &mut self,
        data: &OrganizationData,
        identifier_system: &str,
    ) -> Organization {
        let name = data.name.clone().unwrap_or_else(|| {
            warn!("organization has no extracted name, using placeholder");
            UNKNOWN.to_string()
        });
        let mut org = Organization::named(self.ids.fresh(), name);

        if let Some(registry_id) = non_blank(&data.registry_id) {
            org.identifier
                .push(Identifier::official(identifier_system, registry_id));
        }

        if let Some(phone) = non_blank(&data.phone) {
            org.telecom.push(ContactPoint::new(codes::TELECOM_PHONE, phone));
        }
        if let Some(email) = non_blank(&data.email) {
            org.telecom.push(ContactPoint::new(codes::TELECOM_EMAIL, email));
        }
        if let Some(website) = non_blank(&data.website) {
            org.telecom.push(ContactPoint::new(codes::TELECOM_URL, website));
        }

        org
    }

    fn build_network(&mut self, name: &str) -> Organization {
        let mut org = Organization::named(self.ids.fresh(), name);
        org.type_ = vec![CodeableConcept::coded(
            codes::SYS_ORGANIZATION_TYPE,
            codes::ORG_TYPE_NETWORK_CODE,
            codes::ORG_TYPE_NETWORK_DISPLAY,
        )];
        org
    }

    fn build_plan(
        &mut self,
        plan_data: &PlanData,
        insurer: &Organization,
        tpa: Option<&Organization>,
        networks: &[Organization],
    ) -> InsurancePlan {
        let name = plan_data.name.clone().unwrap_or_else(|| {
            warn!("plan has no extracted name, using placeholder");
            "Unnamed Insurance Plan".to_string()
        });

        let mut plan = InsurancePlan {
            id: self.ids.fresh(),
            meta: Some(Meta::profiled(codes::PROFILE_INSURANCE_PLAN)),
            text: Some(build_narrative(insurer, &name, plan_data, networks.len())),
            language: Some(codes::LANGUAGE_EN_IN.to_string()),
            status: Some(codes::STATUS_ACTIVE.to_string()),
            name: Some(name),
            alias: dedup_preserving_order(&plan_data.aliases),
            owned_by: Some(Reference::local(&insurer.id)),
            administered_by: tpa.map(|tpa| Reference::local(&tpa.id)),
            ..Default::default()
        };

        if plan_data.type_code.is_some() || plan_data.type_display.is_some() {
            let mut concept = CodeableConcept {
                coding: vec![Coding {
                    system: Some(codes::VS_INSURANCE_PLAN_TYPE.to_string()),
                    code: plan_data.type_code.clone(),
                    display: plan_data.type_display.clone(),
                }],
                text: plan_data.type_display.clone(),
            };
            if concept.text.is_none() {
                concept.text = plan_data.type_code.clone();
            }
            plan.type_ = vec![concept];
        }

        if plan_data.period_start.is_some() || plan_data.period_end.is_some() {
            plan.period = Some(Period {
                start: plan_data.period_start.clone(),
                end: plan_data.period_end.clone(),
            });
        }

        plan.network = networks
            .iter()
            .map(|org| {
                let mut reference = Reference::local(&org.id);
                if let Some(name) = &org.name {
                    reference = reference.with_display(name.clone());
                }
                reference
            })
            .collect();

        plan.contact = plan_data.contacts.iter().filter_map(build_contact).collect();

        plan.coverage_area = plan_data
            .coverage_area
            .iter()
            .filter(|area| !area.trim().is_empty())
            .map(|area| Reference::display_only(area.trim()))
            .collect();

        plan.extension = build_extensions(plan_data);
        plan.coverage = self.build_coverages(&plan_data.coverages);
        plan.plan = self.build_sub_plans(&plan_data.sub_plans);

        plan
    }

    fn build_coverages(&self, coverages: &[CoverageData]) -> Vec<Coverage> {
        coverages
            .iter()
            .map(|coverage_data| self.build_coverage(coverage_data))
            .collect()
    }

    fn build_coverage(&self, data: &CoverageData) -> Coverage {
        let mut coverage = Coverage {
            type_: match non_blank(&data.name) {
                Some(name) => CodeableConcept::text_only(name),
                None => CodeableConcept::default(),
            },
            ..Default::default()
        };
        if let Some(condition) = non_blank(&data.condition) {
            coverage.extension = vec![Extension::new(codes::EXT_COVERAGE_CONDITION, condition)];
        }
        coverage.benefit = data
            .benefits
            .iter()
            .map(|benefit_data| self.build_benefit(benefit_data))
            .collect();
        coverage
    }

    /// Benefit category terms go through terminology resolution: a match
    /// yields a SNOMED-coded concept, no match stays free text - a code is
    /// never fabricated
    fn build_benefit(&self, data: &BenefitData) -> Benefit {
        let type_ = match non_blank(&data.category) {
            Some(category) => match self.terminology.resolve(category) {
                Some(entry) => CodeableConcept::coded(
                    entry.system.clone(),
                    entry.code.clone(),
                    entry.display.clone(),
                )
                .with_text(category),
                None => {
                    debug!(term = category, "no terminology match, keeping free text");
                    CodeableConcept::text_only(category)
                }
            },
            None => CodeableConcept::default(),
        };

        Benefit {
            type_,
            limit: data.limits.iter().map(build_limit).collect(),
        }
    }

    fn build_sub_plans(&mut self, sub_plans: &[SubPlanData]) -> Vec<PlanComponent> {
        sub_plans
            .iter()
            .map(|sub_plan| self.build_sub_plan(sub_plan))
            .collect()
    }

    fn build_sub_plan(&mut self, data: &SubPlanData) -> PlanComponent {
        let plan_type = SubPlanType::parse(data.plan_type.as_deref());
        let mut type_concept = CodeableConcept::coded(
            codes::VS_PLAN_TYPE,
            plan_type.code(),
            plan_type.to_string(),
        );
        if let Some(raw) = non_blank(&data.plan_type) {
            type_concept = type_concept.with_text(raw);
        }

        PlanComponent {
            identifier: vec![Identifier {
                use_: Some(codes::IDENTIFIER_USE_OFFICIAL.to_string()),
                system: None,
                value: Some(format!("{}{}", codes::FULL_URL_PREFIX, self.ids.fresh())),
            }],
            type_: Some(type_concept),
            specific_cost: data.costs.iter().map(build_cost).collect(),
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Trimmed non-empty content of an optional field
fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Copy aliases as given: input order preserved, exact duplicates dropped
fn dedup_preserving_order(aliases: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(aliases.len());
    for alias in aliases {
        if !alias.trim().is_empty() && !seen.contains(alias) {
            seen.push(alias.clone());
        }
    }
    seen
}

/// Derived summary text; placeholders cover every missing field, so this
/// can never fail
fn build_narrative(
    insurer: &Organization,
    plan_name: &str,
    plan_data: &PlanData,
    network_count: usize,
) -> Narrative {
    let insurer_name = insurer.name.as_deref().unwrap_or(UNKNOWN);
    let start = plan_data.period_start.as_deref().unwrap_or("unknown");
    let end = plan_data.period_end.as_deref().unwrap_or("unknown");
    Narrative::generated(&format!(
        "Insurance Plan: {plan_name}. Insurer: {insurer_name}. \
         Period: {start} to {end}. Provider networks: {network_count}."
    ))
}

fn build_contact(data: &ContactData) -> Option<PlanContact> {
    let mut contact = PlanContact::default();
    if let Some(purpose) = non_blank(&data.purpose) {
        contact.purpose = Some(CodeableConcept::text_only(purpose));
    }
    if let Some(name) = non_blank(&data.name) {
        contact.name = Some(HumanName {
            text: Some(name.to_string()),
        });
    }
    if let Some(phone) = non_blank(&data.phone) {
        contact
            .telecom
            .push(ContactPoint::new(codes::TELECOM_PHONE, phone));
    }
    if let Some(email) = non_blank(&data.email) {
        contact
            .telecom
            .push(ContactPoint::new(codes::TELECOM_EMAIL, email));
    }
    if contact == PlanContact::default() {
        None
    } else {
        Some(contact)
    }
}

/// Exclusions and supporting-document requirements become flat
/// `(type, description)` extension records, one per item
fn build_extensions(plan_data: &PlanData) -> Vec<Extension> {
    let mut extensions = Vec::new();

    for exclusion in &plan_data.exclusions {
        let description = match (
            non_blank(&exclusion.category),
            non_blank(&exclusion.statement),
        ) {
            (Some(category), Some(statement)) => format!("{category}: {statement}"),
            (Some(category), None) => category.to_string(),
            (None, Some(statement)) => statement.to_string(),
            (None, None) => {
                warn!("skipping exclusion with no content");
                continue;
            }
        };
        extensions.push(Extension::new(codes::EXT_EXCLUSION, description));
    }

    for requirement in &plan_data.supporting_documents {
        let description = match (
            non_blank(&requirement.category),
            non_blank(&requirement.document),
        ) {
            (Some(category), Some(document)) => format!("{category}: {document}"),
            (Some(category), None) => category.to_string(),
            (None, Some(document)) => document.to_string(),
            (None, None) => {
                warn!("skipping supporting-document requirement with no content");
                continue;
            }
        };
        extensions.push(Extension::new(codes::EXT_SUPPORTING_INFO, description));
    }

    extensions
}

/// A limit keeps its declared value and unit verbatim in the quantity; the
/// unit *tag* comes from the closed unit vocabulary, defaulting to
/// "unspecified" rather than guessing a financial unit
fn build_limit(data: &LimitData) -> Limit {
    let unit = LimitUnit::parse(data.unit.as_deref());
    Limit {
        value: Some(Quantity {
            value: data.value,
            unit: data.unit.clone(),
        }),
        code: Some(CodeableConcept::coded(
            codes::SYS_BENEFIT_UNIT,
            unit.code(),
            unit.to_string(),
        )),
    }
}

fn build_cost(data: &CostData) -> SpecificCost {
    let applicability = CostApplicability::parse(data.applicability.as_deref());
    SpecificCost {
        type_: non_blank(&data.description).map(CodeableConcept::text_only),
        applicability: Some(CodeableConcept::coded(
            codes::SYS_APPLICABILITY,
            applicability.code(),
            applicability.to_string(),
        )),
        value: Some(Quantity {
            value: data.value,
            unit: data.unit.clone(),
        }),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn optional_name() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[A-Za-z ]{1,12}")
    }

    prop_compose! {
        fn arb_data()(
            insurer_name in optional_name(),
            tpa in proptest::option::of(optional_name()),
            plan_name in optional_name(),
            networks in proptest::collection::vec("[A-Za-z ]{0,10}", 0..4),
            categories in proptest::collection::vec(optional_name(), 0..3),
        ) -> ExtractedPolicyData {
            ExtractedPolicyData {
                insurer: Some(OrganizationData { name: insurer_name, ..Default::default() }),
                tpa: tpa.map(|name| OrganizationData { name, ..Default::default() }),
                plan: Some(PlanData {
                    name: plan_name,
                    networks,
                    coverages: vec![CoverageData {
                        name: None,
                        condition: None,
                        benefits: categories
                            .into_iter()
                            .map(|category| BenefitData { category, limits: Vec::new() })
                            .collect(),
                    }],
                    ..Default::default()
                }),
            }
        }
    }

    proptest! {
        /// Property: every reference in a mapped bundle resolves to a
        /// resource in the same bundle, whatever optional fields are absent
        #[test]
        fn test_referential_closure(data in arb_data()) {
            let dict = TerminologyDict::from_entries(codes::SYS_SNOMED_CT, []);
            let mut mapper = BundleMapper::new(&dict)
                .with_id_generator(IdGenerator::sequential())
                .with_timestamp("2026-01-01T00:00:00Z");
            let bundle = mapper.map(&data).unwrap();

            let ids: Vec<String> = bundle
                .resources()
                .map(|resource| format!("{}{}", codes::FULL_URL_PREFIX, resource.id()))
                .collect();
            let plan = bundle.insurance_plan().unwrap();
            for reference in plan
                .network
                .iter()
                .chain(plan.owned_by.iter())
                .chain(plan.administered_by.iter())
            {
                if let Some(target) = &reference.reference {
                    prop_assert!(ids.contains(target), "dangling reference {}", target);
                }
            }
        }

        /// Property: resource ids are unique within a bundle
        #[test]
        fn test_unique_resource_ids(data in arb_data()) {
            let dict = TerminologyDict::from_entries(codes::SYS_SNOMED_CT, []);
            let mut mapper = BundleMapper::new(&dict)
                .with_id_generator(IdGenerator::sequential())
                .with_timestamp("2026-01-01T00:00:00Z");
            let bundle = mapper.map(&data).unwrap();

            let mut ids: Vec<&str> = bundle.resources().map(|r| r.id()).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(before, ids.len());
        }
    }
}
