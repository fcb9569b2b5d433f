//! The versioned extraction template and ingress validation

use nhcx_domain::ExtractedPolicyData;
use serde_json::{json, Value};
use tracing::warn;

use crate::ShapeError;

/// JSON kind a template field declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON object (or null)
    Object,
    /// A JSON string (or null)
    Text,
    /// A JSON number (or null; numeric strings are coerced)
    Number,
    /// A JSON array (or null)
    List,
}

/// One field of the extraction contract
///
/// `path` uses `[]` to mark list fan-out ("plan.coverages[].benefits").
/// `instruction` is the text handed to the LLM for this field; `required`
/// marks key paths whose absence fails ingress outright.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Dotted key path within the document
    pub path: &'static str,
    /// Extraction instruction shown to the LLM
    pub instruction: &'static str,
    /// Declared JSON kind
    pub kind: FieldKind,
    /// Whether the key must be present for mapping to proceed
    pub required: bool,
}

/// A versioned template of expected fields and instructions
///
/// Consumed by the prompt builder (to tell the LLM what to fill) and by
/// ingress validation (to check the LLM actually filled that shape).
pub struct SchemaTemplate {
    version: &'static str,
    fields: Vec<FieldSpec>,
}

macro_rules! field {
    ($path:expr, $kind:ident, required, $instruction:expr) => {
        FieldSpec {
            path: $path,
            instruction: $instruction,
            kind: FieldKind::$kind,
            required: true,
        }
    };
    ($path:expr, $kind:ident, $instruction:expr) => {
        FieldSpec {
            path: $path,
            instruction: $instruction,
            kind: FieldKind::$kind,
            required: false,
        }
    };
}

impl SchemaTemplate {
    /// Template version 1 - the only version currently published
    pub fn v1() -> Self {
        let fields = vec![
            field!("insurer", Object, required,
                "The insurance company issuing the policy. Use null for any field not found."),
            field!("insurer.name", Text, "Registered name of the insurance company."),
            field!("insurer.registryId", Text,
                "IRDAI registration number of the insurer, exactly as printed. Null if absent."),
            field!("insurer.phone", Text, "Customer-care phone number of the insurer."),
            field!("insurer.email", Text, "Customer-care email address of the insurer."),
            field!("insurer.website", Text, "Public website of the insurer."),
            field!("tpa", Object, required,
                "Third-party administrator servicing claims, or null when the insurer services claims itself."),
            field!("tpa.name", Text, "Registered name of the TPA."),
            field!("tpa.registryId", Text, "IRDAI registration number of the TPA."),
            field!("tpa.phone", Text, "Claims helpline phone number of the TPA."),
            field!("tpa.email", Text, "Claims email address of the TPA."),
            field!("tpa.website", Text, "Public website of the TPA."),
            field!("plan", Object, required, "The insurance plan described by the document."),
            field!("plan.name", Text, "Marketed name of the plan."),
            field!("plan.typeCode", Text, "Plan type code if the document states one."),
            field!("plan.typeDisplay", Text,
                "Plan type in words, e.g. 'Hospitalisation Indemnity'."),
            field!("plan.aliases", List,
                "Alternate names or short codes for the plan, in document order."),
            field!("plan.periodStart", Text, "Coverage period start date, ISO format."),
            field!("plan.periodEnd", Text, "Coverage period end date, ISO format."),
            field!("plan.networks", List,
                "Names of provider/hospital networks attached to the plan."),
            field!("plan.contacts", List, "Helpline and claims contacts for the plan."),
            field!("plan.contacts[].purpose", Text, "What the contact is for."),
            field!("plan.contacts[].name", Text, "Contact name or team."),
            field!("plan.contacts[].phone", Text, "Contact phone number."),
            field!("plan.contacts[].email", Text, "Contact email address."),
            field!("plan.coverageArea", List, "Geographic areas the plan covers."),
            field!("plan.coverages", List,
                "Coverage groups, e.g. 'Inpatient Care'. Each group lists its benefits."),
            field!("plan.coverages[].name", Text, "Name of the coverage group."),
            field!("plan.coverages[].condition", Text,
                "Qualifying condition on the group, e.g. 'Subject to sum insured'."),
            field!("plan.coverages[].benefits", List, "Benefits within this coverage group."),
            field!("plan.coverages[].benefits[].category", Text,
                "Clinical/benefit category term exactly as worded, e.g. 'Cardiac Surgery'."),
            field!("plan.coverages[].benefits[].limits", List,
                "Quantified caps on the benefit."),
            field!("plan.coverages[].benefits[].limits[].value", Number,
                "Numeric magnitude of the cap."),
            field!("plan.coverages[].benefits[].limits[].unit", Text,
                "Declared unit: 'currency', 'days' or 'percent'. Null when unclear - never guess."),
            field!("plan.exclusions", List, "Policy exclusions."),
            field!("plan.exclusions[].category", Text, "Exclusion category."),
            field!("plan.exclusions[].statement", Text, "Full exclusion statement."),
            field!("plan.supportingDocuments", List,
                "Documents required to support a claim."),
            field!("plan.supportingDocuments[].category", Text,
                "Requirement category, e.g. 'Proof of Identity'."),
            field!("plan.supportingDocuments[].document", Text,
                "Accepted document, e.g. 'Aadhaar Card'."),
            field!("plan.subPlans", List,
                "Declared sub-plans (Individual, Family Floater, ...) with their costs."),
            field!("plan.subPlans[].planType", Text, "Sub-plan type as worded."),
            field!("plan.subPlans[].costs", List, "Cost entries for the sub-plan."),
            field!("plan.subPlans[].costs[].description", Text, "What the cost is for."),
            field!("plan.subPlans[].costs[].value", Number,
                "Monetary or percentage magnitude."),
            field!("plan.subPlans[].costs[].unit", Text,
                "Declared unit: 'currency' or 'percent'."),
            field!("plan.subPlans[].costs[].applicability", Text,
                "'in-network', 'out-of-network', or null when the document does not say."),
        ];
        Self {
            version: "1",
            fields,
        }
    }

    /// Template version string
    pub fn version(&self) -> &str {
        self.version
    }

    /// Declared fields, in template order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The empty document the LLM must fill: every key present, every leaf
    /// null; list fields carry one exemplar row showing their entry shape
    pub fn skeleton(&self) -> Value {
        json!({
            "insurer": {
                "name": null, "registryId": null, "phone": null, "email": null, "website": null
            },
            "tpa": {
                "name": null, "registryId": null, "phone": null, "email": null, "website": null
            },
            "plan": {
                "name": null,
                "typeCode": null,
                "typeDisplay": null,
                "aliases": [],
                "periodStart": null,
                "periodEnd": null,
                "networks": [],
                "contacts": [
                    { "purpose": null, "name": null, "phone": null, "email": null }
                ],
                "coverageArea": [],
                "coverages": [
                    {
                        "name": null,
                        "condition": null,
                        "benefits": [
                            {
                                "category": null,
                                "limits": [ { "value": null, "unit": null } ]
                            }
                        ]
                    }
                ],
                "exclusions": [ { "category": null, "statement": null } ],
                "supportingDocuments": [ { "category": null, "document": null } ],
                "subPlans": [
                    {
                        "planType": null,
                        "costs": [
                            {
                                "description": null, "value": null,
                                "unit": null, "applicability": null
                            }
                        ]
                    }
                ]
            }
        })
    }

    /// Validate a raw document against this template and decode it
    ///
    /// Required keys must be present (`MissingKey` otherwise); every present
    /// non-null value must have its declared kind (`WrongShape` otherwise).
    /// Numeric strings in amount fields are coerced; unparseable amounts
    /// degrade to null with a warning, never to a hard failure.
    pub fn parse(&self, raw: &Value) -> Result<ExtractedPolicyData, ShapeError> {
        if !raw.is_object() {
            return Err(ShapeError::NotAnObject);
        }

        for spec in self.fields.iter().filter(|s| s.required) {
            // Required paths never contain [] fan-out in v1.
            if lookup(raw, spec.path).is_none() {
                return Err(ShapeError::MissingKey {
                    path: spec.path.to_string(),
                });
            }
        }

        for spec in &self.fields {
            for (path, value) in resolve_path(raw, spec.path) {
                check_kind(&path, value, spec.kind)?;
            }
        }

        let mut normalized = raw.clone();
        coerce_amounts(&mut normalized);

        serde_json::from_value(normalized).map_err(|e| ShapeError::Malformed(e.to_string()))
    }
}

impl Default for SchemaTemplate {
    fn default() -> Self {
        Self::v1()
    }
}

/// Look a non-wildcard dotted path up; `None` means the key is absent
/// (a null value is `Some`)
fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Resolve a dotted path with `[]` fan-out into every concrete value it
/// names, with the concrete (indexed) path for error reporting. Branches
/// that hit an absent key or a null intermediate are dropped silently -
/// key-presence is enforced separately and only for required paths.
fn resolve_path<'a>(root: &'a Value, path: &str) -> Vec<(String, &'a Value)> {
    let mut frontier: Vec<(String, &'a Value)> = vec![(String::new(), root)];

    for segment in path.split('.') {
        let (key, fan_out) = match segment.strip_suffix("[]") {
            Some(key) => (key, true),
            None => (segment, false),
        };

        let mut next = Vec::new();
        for (prefix, value) in frontier {
            let Some(child) = value.as_object().and_then(|o| o.get(key)) else {
                continue;
            };
            let child_path = if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{prefix}.{key}")
            };
            if fan_out {
                let Some(items) = child.as_array() else {
                    // Wrong shape surfaces when the parent list field itself
                    // is checked; nothing to fan out over here.
                    continue;
                };
                for (idx, item) in items.iter().enumerate() {
                    next.push((format!("{child_path}[{idx}]"), item));
                }
            } else {
                next.push((child_path, child));
            }
        }
        frontier = next;
    }

    frontier
}

fn check_kind(path: &str, value: &Value, kind: FieldKind) -> Result<(), ShapeError> {
    let ok = match (kind, value) {
        (_, Value::Null) => true,
        (FieldKind::Object, Value::Object(_)) => true,
        (FieldKind::Text, Value::String(_)) => true,
        (FieldKind::List, Value::Array(_)) => true,
        (FieldKind::Number, Value::Number(_)) => true,
        // Amounts arrive as strings often enough that coercion handles them.
        (FieldKind::Number, Value::String(_)) => true,
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(ShapeError::WrongShape {
            path: path.to_string(),
            expected: kind_name(kind),
            actual: json_kind(value),
        })
    }
}

fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Object => "object",
        FieldKind::Text => "string",
        FieldKind::Number => "number",
        FieldKind::List => "list",
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Coerce numeric-string amounts in benefit limits and sub-plan costs;
/// unparseable amounts degrade to null
fn coerce_amounts(root: &mut Value) {
    if let Some(coverages) = root
        .pointer_mut("/plan/coverages")
        .and_then(Value::as_array_mut)
    {
        for coverage in coverages {
            let Some(benefits) = coverage.get_mut("benefits").and_then(Value::as_array_mut)
            else {
                continue;
            };
            for benefit in benefits {
                let Some(limits) = benefit.get_mut("limits").and_then(Value::as_array_mut)
                else {
                    continue;
                };
                for limit in limits {
                    coerce_amount(limit, "value");
                }
            }
        }
    }

    if let Some(sub_plans) = root
        .pointer_mut("/plan/subPlans")
        .and_then(Value::as_array_mut)
    {
        for sub_plan in sub_plans {
            let Some(costs) = sub_plan.get_mut("costs").and_then(Value::as_array_mut) else {
                continue;
            };
            for cost in costs {
                coerce_amount(cost, "value");
            }
        }
    }
}

fn coerce_amount(entry: &mut Value, key: &str) {
    let Some(value) = entry.get_mut(key) else {
        return;
    };
    if let Value::String(text) = value {
        let cleaned = text.trim().replace(',', "");
        match cleaned.parse::<f64>() {
            Ok(number) => {
                *value = serde_json::Number::from_f64(number)
                    .map(Value::Number)
                    .unwrap_or(Value::Null);
            }
            Err(_) => {
                warn!(amount = %text, "discarding non-numeric amount");
                *value = Value::Null;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_document() -> Value {
        json!({ "insurer": { "name": "Acme Health" }, "tpa": null, "plan": { "name": "Plan A" } })
    }

    #[test]
    fn test_parse_minimal_document() {
        let template = SchemaTemplate::v1();
        let data = template.parse(&minimal_document()).unwrap();
        assert_eq!(data.insurer.unwrap().name.as_deref(), Some("Acme Health"));
        assert!(data.tpa.is_none());
        assert_eq!(data.plan.unwrap().name.as_deref(), Some("Plan A"));
    }

    #[test]
    fn test_missing_insurer_key_is_input_shape_error() {
        let template = SchemaTemplate::v1();
        let raw = json!({ "tpa": null, "plan": {} });
        match template.parse(&raw) {
            Err(ShapeError::MissingKey { path }) => assert_eq!(path, "insurer"),
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn test_null_insurer_value_is_not_a_shape_error() {
        // Key present, value null: the schema contract is satisfied; the
        // mapper decides whether it can proceed.
        let template = SchemaTemplate::v1();
        let raw = json!({ "insurer": null, "tpa": null, "plan": {} });
        let data = template.parse(&raw).unwrap();
        assert!(data.insurer.is_none());
    }

    #[test]
    fn test_scalar_in_list_field_is_wrong_shape() {
        let template = SchemaTemplate::v1();
        let raw = json!({
            "insurer": null, "tpa": null,
            "plan": { "coverages": "Inpatient Care" }
        });
        match template.parse(&raw) {
            Err(ShapeError::WrongShape {
                path,
                expected,
                actual,
            }) => {
                assert_eq!(path, "plan.coverages");
                assert_eq!(expected, "list");
                assert_eq!(actual, "string");
            }
            other => panic!("expected WrongShape, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_reports_nested_indexed_path() {
        let template = SchemaTemplate::v1();
        let raw = json!({
            "insurer": null, "tpa": null,
            "plan": { "coverages": [
                { "benefits": [ { "category": 42 } ] }
            ]}
        });
        match template.parse(&raw) {
            Err(ShapeError::WrongShape { path, .. }) => {
                assert_eq!(path, "plan.coverages[0].benefits[0].category");
            }
            other => panic!("expected WrongShape, got {other:?}"),
        }
    }

    #[test]
    fn test_numeric_string_amount_is_coerced() {
        let template = SchemaTemplate::v1();
        let raw = json!({
            "insurer": null, "tpa": null,
            "plan": { "coverages": [ { "benefits": [
                { "category": "Room Rent", "limits": [ { "value": "5,000", "unit": "INR" } ] }
            ]}]}
        });
        let data = template.parse(&raw).unwrap();
        let plan = data.plan.unwrap();
        let limit = &plan.coverages[0].benefits[0].limits[0];
        assert_eq!(limit.value, Some(5000.0));
    }

    #[test]
    fn test_garbage_amount_degrades_to_none() {
        let template = SchemaTemplate::v1();
        let raw = json!({
            "insurer": null, "tpa": null,
            "plan": { "subPlans": [ { "planType": "Individual", "costs": [
                { "description": "Copay", "value": "as applicable", "unit": null, "applicability": null }
            ]}]}
        });
        let data = template.parse(&raw).unwrap();
        let plan = data.plan.unwrap();
        assert_eq!(plan.sub_plans[0].costs[0].value, None);
    }

    #[test]
    fn test_root_must_be_object() {
        let template = SchemaTemplate::v1();
        assert!(matches!(
            template.parse(&json!([1, 2])),
            Err(ShapeError::NotAnObject)
        ));
    }

    #[test]
    fn test_skeleton_contains_every_template_path() {
        let template = SchemaTemplate::v1();
        let skeleton = template.skeleton();
        for spec in template.fields() {
            assert!(
                !resolve_path(&skeleton, spec.path).is_empty(),
                "skeleton is missing `{}`",
                spec.path
            );
        }
    }

    #[test]
    fn test_template_is_versioned() {
        assert_eq!(SchemaTemplate::v1().version(), "1");
    }
}
