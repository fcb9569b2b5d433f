//! Bundle resource shape

use serde::{Deserialize, Serialize};

use super::insurance_plan::InsurancePlan;
use super::organization::Organization;

/// Bundle type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    /// A set of resources collected into a single package
    Collection,
    /// A document bundle
    Document,
    /// A message bundle
    Message,
    /// A transaction bundle
    Transaction,
    /// A search result set
    Searchset,
}

/// A resource that can appear as a bundle entry
///
/// Internally tagged so the wire form carries `"resourceType"` alongside the
/// resource's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    /// An Organization entry (insurer, TPA or network)
    Organization(Organization),
    /// The InsurancePlan entry
    InsurancePlan(InsurancePlan),
}

impl Resource {
    /// Bundle-unique id of the wrapped resource
    pub fn id(&self) -> &str {
        match self {
            Self::Organization(org) => &org.id,
            Self::InsurancePlan(plan) => &plan.id,
        }
    }

    /// Resource type name as it appears on the wire
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Organization(_) => "Organization",
            Self::InsurancePlan(_) => "InsurancePlan",
        }
    }
}

/// One entry in a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Bundle-local `urn:uuid:` URL of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// The resource itself
    pub resource: Resource,
}

impl BundleEntry {
    /// Wrap a resource, deriving its full URL from the resource id
    pub fn new(resource: Resource) -> Self {
        Self {
            full_url: Some(format!(
                "{}{}",
                super::codes::FULL_URL_PREFIX,
                resource.id()
            )),
            resource,
        }
    }
}

/// The output bundle: a collection of linked resources for one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Literal resource type tag, always `"Bundle"`
    pub resource_type: String,

    /// Bundle id
    pub id: String,

    /// Collection-type tag
    #[serde(rename = "type")]
    pub type_: BundleType,

    /// Locale tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Process-local assembly timestamp (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Member resources, in the fixed submission order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// An empty collection bundle with the standard locale tag
    pub fn collection(id: impl Into<String>) -> Self {
        Self {
            resource_type: "Bundle".to_string(),
            id: id.into(),
            type_: BundleType::Collection,
            language: Some(super::codes::LANGUAGE_EN_IN.to_string()),
            timestamp: None,
            entry: Vec::new(),
        }
    }

    /// Append a resource as the last entry
    pub fn push(&mut self, resource: Resource) {
        self.entry.push(BundleEntry::new(resource));
    }

    /// Iterate the wrapped resources in entry order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entry.iter().map(|entry| &entry.resource)
    }

    /// The InsurancePlan entry, if the bundle holds exactly one or more
    pub fn insurance_plan(&self) -> Option<&InsurancePlan> {
        self.resources().find_map(|resource| match resource {
            Resource::InsurancePlan(plan) => Some(plan),
            _ => None,
        })
    }

    /// Iterate the Organization entries in entry order
    pub fn organizations(&self) -> impl Iterator<Item = &Organization> {
        self.resources().filter_map(|resource| match resource {
            Resource::Organization(org) => Some(org),
            _ => None,
        })
    }
}
