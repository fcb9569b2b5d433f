//! Organization resource shape

use serde::{Deserialize, Serialize};

use super::datatypes::{CodeableConcept, ContactPoint, Identifier, Meta};

/// An Organization resource: insurer, TPA or provider network
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Organization {
    /// Bundle-unique resource id
    pub id: String,

    /// Profile metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Organization name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Business identifiers (regulator registrations)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    /// Organization kind tags (provider network, ...)
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub type_: Vec<CodeableConcept>,

    /// Phone/email/url contact points
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
}

impl Organization {
    /// A named organization with the standard profile tag
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            meta: Some(Meta::profiled(super::codes::PROFILE_ORGANIZATION)),
            name: Some(name.into()),
            identifier: Vec::new(),
            type_: Vec::new(),
            telecom: Vec::new(),
        }
    }
}
