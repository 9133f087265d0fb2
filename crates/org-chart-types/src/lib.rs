//! Org Chart Types - boundary types shared between a host and the org chart engine.
//!
//! The host hands the engine a flat list of rows with free-form column names.
//! This crate owns the two shapes that cross that boundary:
//! - `Employee` - the fixed record shape the engine works on
//! - `FieldMapping` - which host column feeds which `Employee` field
//!
//! ```
//! use org_chart_types::{Employee, FieldMapping};
//! use serde_json::json;
//!
//! let row = json!({ "name": "Ada", "manager": "", "department": "Eng" });
//! let employee = FieldMapping::default().map_row(row.as_object().unwrap());
//! assert_eq!(employee, Employee::new("Ada", "").with_org_unit("Eng"));
//! ```

mod employee;
mod mapping;

pub use employee::Employee;
pub use mapping::FieldMapping;
