//! Loading host rows into employee records.
//!
//! Rows are a JSON or YAML array of objects with free-form columns; the
//! configured [`FieldMapping`] turns each into an [`Employee`].

use std::path::Path;

use org_chart_types::{Employee, FieldMapping};
use serde_json::{Map, Value};

use crate::error::{read_file, FileFormat, OrgChartError, Result};

type Row = Map<String, Value>;

/// Load records from a `.json`, `.yaml` or `.yml` file.
pub fn load_records(path: &Path, mapping: &FieldMapping) -> Result<Vec<Employee>> {
    let format = FileFormat::from_path(path)?;
    let text = read_file(path)?;
    let context = path.display().to_string();

    let rows: Vec<Row> = match format {
        FileFormat::Json => {
            serde_json::from_str(&text).map_err(|source| OrgChartError::Json { context, source })?
        }
        FileFormat::Yaml => {
            serde_yaml::from_str(&text).map_err(|source| OrgChartError::Yaml { context, source })?
        }
    };

    let records = mapping.map_rows(&rows);
    tracing::debug!(path = %path.display(), records = records.len(), "loaded employee records");
    Ok(records)
}

/// Parse records from a JSON array of rows.
pub fn records_from_json_str(json: &str, mapping: &FieldMapping) -> Result<Vec<Employee>> {
    let rows: Vec<Row> = serde_json::from_str(json).map_err(|source| OrgChartError::Json {
        context: "inline records".into(),
        source,
    })?;
    Ok(mapping.map_rows(&rows))
}
