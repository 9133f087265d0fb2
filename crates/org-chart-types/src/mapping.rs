//! Column mapping from free-form host rows to `Employee`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Employee;

/// Names of the host columns feeding each `Employee` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    pub name: String,
    pub manager: String,
    pub title: String,
    pub org_unit: String,
    pub office: String,
    pub email: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            name: "name".into(),
            manager: "manager".into(),
            title: "title".into(),
            org_unit: "department".into(),
            office: "office".into(),
            email: "email".into(),
        }
    }
}

impl FieldMapping {
    /// Map one host row into an `Employee`.
    ///
    /// Never fails: a missing name column yields an empty name, which the
    /// validator reports. Columns not named by the mapping land in
    /// `attributes`.
    pub fn map_row(&self, row: &Map<String, Value>) -> Employee {
        let mut employee = Employee {
            name: self.text(row, &self.name).unwrap_or_default(),
            manager: self.text(row, &self.manager).unwrap_or_default(),
            title: self.optional_text(row, &self.title),
            org_unit: self.optional_text(row, &self.org_unit),
            office: self.optional_text(row, &self.office),
            email: self.optional_text(row, &self.email),
            ..Default::default()
        };

        for (key, value) in row {
            if !self.is_mapped(key) {
                employee.attributes.insert(key.clone(), value.clone());
            }
        }

        employee
    }

    /// Map a batch of host rows, preserving order.
    pub fn map_rows<'a, I>(&self, rows: I) -> Vec<Employee>
    where
        I: IntoIterator<Item = &'a Map<String, Value>>,
    {
        rows.into_iter().map(|row| self.map_row(row)).collect()
    }

    fn is_mapped(&self, key: &str) -> bool {
        [
            &self.name,
            &self.manager,
            &self.title,
            &self.org_unit,
            &self.office,
            &self.email,
        ]
        .iter()
        .any(|column| column.as_str() == key)
    }

    fn text(&self, row: &Map<String, Value>, column: &str) -> Option<String> {
        row.get(column).and_then(scalar_text)
    }

    fn optional_text(&self, row: &Map<String, Value>, column: &str) -> Option<String> {
        self.text(row, column).filter(|s| !s.trim().is_empty())
    }
}

/// Render a scalar cell as text; null, arrays and objects have no text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
