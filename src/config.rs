//! Engine configuration.
//!
//! Configuration for the view-state controller: default expand depth,
//! which records become roots, host column mapping and key bindings.
//! Loadable from YAML or JSON; every field has a default.

use std::path::Path;

use org_chart_types::FieldMapping;
use serde::{Deserialize, Serialize};

use crate::error::{read_file, FileFormat, OrgChartError, Result};
use crate::navigation::NavigationConfig;

/// Expand depth applied when a forest is (re)built.
///
/// Depth 1 expands level 0 only: roots and their direct reports are
/// visible, grandchildren are not.
pub const DEFAULT_EXPAND_DEPTH: usize = 1;

/// Largest accepted `initial_expand_depth`.
pub const MAX_EXPAND_DEPTH: usize = 64;

/// Which records are handed to the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPolicy {
    /// Every record; dangling or cyclic manager references surface as
    /// extra roots.
    #[default]
    OrphansAsRoots,

    /// Only records whose chain reaches a true root.
    MappedOnly,
}

/// Configuration for an [`crate::view::OrgChartState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgChartConfig {
    /// Depth used by `reset_to_default_expand` and on every rebuild.
    pub initial_expand_depth: usize,

    /// Record selection policy for tree construction.
    pub root_policy: RootPolicy,

    /// Host column names.
    pub field_mapping: FieldMapping,

    /// Keyboard bindings for the navigator.
    pub navigation: NavigationConfig,
}

impl Default for OrgChartConfig {
    fn default() -> Self {
        Self {
            initial_expand_depth: DEFAULT_EXPAND_DEPTH,
            root_policy: RootPolicy::default(),
            field_mapping: FieldMapping::default(),
            navigation: NavigationConfig::default(),
        }
    }
}

impl OrgChartConfig {
    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = FileFormat::from_path(path)?;
        let text = read_file(path)?;
        let context = path.display().to_string();

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&text)
                .map_err(|source| OrgChartError::Json { context, source })?,
            FileFormat::Yaml => serde_yaml::from_str(&text)
                .map_err(|source| OrgChartError::Yaml { context, source })?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|source| OrgChartError::Yaml {
            context: "inline config".into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if self.initial_expand_depth > MAX_EXPAND_DEPTH {
            return Err(OrgChartError::InvalidConfig {
                field: "initial_expand_depth",
                reason: format!(
                    "is {} (max supported: {})",
                    self.initial_expand_depth, MAX_EXPAND_DEPTH
                ),
            });
        }
        Ok(())
    }

    /// Set the initial expand depth.
    pub fn with_initial_expand_depth(mut self, depth: usize) -> Self {
        self.initial_expand_depth = depth;
        self
    }

    /// Set the root policy.
    pub fn with_root_policy(mut self, policy: RootPolicy) -> Self {
        self.root_policy = policy;
        self
    }

    /// Set the host column mapping.
    pub fn with_field_mapping(mut self, mapping: FieldMapping) -> Self {
        self.field_mapping = mapping;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavCommand;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = OrgChartConfig::default();
        assert_eq!(config.initial_expand_depth, 1);
        assert_eq!(config.root_policy, RootPolicy::OrphansAsRoots);
        assert_eq!(config.field_mapping.org_unit, "department");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = OrgChartConfig::from_yaml_str(
            r#"
initial_expand_depth: 2
root_policy: mapped_only
field_mapping:
  manager: reports_to
navigation:
  bindings:
    k: parent
"#,
        )
        .unwrap();

        assert_eq!(config.initial_expand_depth, 2);
        assert_eq!(config.root_policy, RootPolicy::MappedOnly);
        assert_eq!(config.field_mapping.manager, "reports_to");
        assert_eq!(config.field_mapping.name, "name");
        assert_eq!(config.navigation.command_for("k"), Some(NavCommand::Parent));
    }

    #[test]
    fn test_rejects_deep_expand() {
        let err = OrgChartConfig::from_yaml_str("initial_expand_depth: 1000").unwrap_err();
        assert_eq!(err.code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"initial_expand_depth": 3}}"#).unwrap();

        let config = OrgChartConfig::from_path(file.path()).unwrap();
        assert_eq!(config.initial_expand_depth, 3);
    }

    #[test]
    fn test_from_yaml_file_with_bad_content() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "initial_expand_depth: [not, a, number]").unwrap();

        let err = OrgChartConfig::from_path(file.path()).unwrap_err();
        assert_eq!(err.code(), "INVALID_YAML");
    }

    #[test]
    fn test_builder_setters() {
        let config = OrgChartConfig::default()
            .with_initial_expand_depth(0)
            .with_root_policy(RootPolicy::MappedOnly);
        assert_eq!(config.initial_expand_depth, 0);
        assert_eq!(config.root_policy, RootPolicy::MappedOnly);
    }
}
