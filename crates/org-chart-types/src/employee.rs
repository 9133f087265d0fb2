//! Employee record - the immutable input unit of the org chart.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One row of the organizational data, keyed by display name.
///
/// `name` is the identity key: `manager` is matched against other records'
/// `name` by exact string equality. Everything else is opaque payload as
/// far as the engine is concerned, apart from `org_unit` and `office`
/// which drive filtering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Employee {
    /// Display name, unique identity key
    pub name: String,

    /// Manager reference (another record's `name`), blank for top-level staff
    #[serde(default)]
    pub manager: String,

    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Department / org unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_unit: Option<String>,

    /// Office location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Any other host columns, carried through untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

impl Employee {
    /// Create a record with a name and a manager reference.
    pub fn new(name: impl Into<String>, manager: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            manager: manager.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_org_unit(mut self, org_unit: impl Into<String>) -> Self {
        self.org_unit = Some(org_unit.into());
        self
    }

    pub fn with_office(mut self, office: impl Into<String>) -> Self {
        self.office = Some(office.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// True when the manager reference is non-blank.
    ///
    /// Whitespace-only references count as blank, so such records are
    /// top-level roots.
    pub fn has_manager(&self) -> bool {
        !self.manager.trim().is_empty()
    }

    /// The manager reference as written, or `None` when blank.
    pub fn manager_ref(&self) -> Option<&str> {
        self.has_manager().then_some(self.manager.as_str())
    }

    /// True when the display name is empty or whitespace.
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}
