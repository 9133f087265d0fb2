//! Aggregate validation report.

use std::collections::BTreeSet;

use org_chart_types::Employee;
use serde::{Deserialize, Serialize};

use super::cycle_members;
use crate::graph::ManagerGraph;

/// Counts behind a validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    /// Records inspected.
    pub total: usize,
    /// Records with a blank manager reference.
    pub roots: usize,
    /// Records whose manager reference matches no record.
    pub orphaned: usize,
    /// Distinct ids on a manager-reference loop.
    pub cyclic: usize,
    /// Records with a blank display name.
    pub unnamed: usize,
    /// Records repeating an earlier record's display name.
    pub duplicates: usize,
}

/// Result of validating an employee list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// One advisory line per problem class found.
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

impl ValidationReport {
    /// No warnings were raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validate an employee list.
///
/// Checks:
/// 1. Root count (none, or more than one, is worth a warning)
/// 2. Dangling manager references
/// 3. Manager-reference loops
/// 4. Blank display names
/// 5. Duplicate display names
///
/// Borrowing the records is the whole contract: the list is never
/// altered, and the caller keeps using it alongside the report.
pub fn validate(records: &[Employee]) -> ValidationReport {
    let graph = ManagerGraph::new(records);
    let on_cycle = cycle_members(&graph);

    let cyclic_ids: BTreeSet<&str> = records
        .iter()
        .zip(&on_cycle)
        .filter(|(_, on)| **on)
        .map(|(record, _)| record.name.as_str())
        .collect();

    let stats = ValidationStats {
        total: records.len(),
        roots: records.iter().filter(|r| !r.has_manager()).count(),
        orphaned: records
            .iter()
            .filter(|r| r.manager_ref().is_some_and(|m| graph.lookup(m).is_none()))
            .count(),
        cyclic: cyclic_ids.len(),
        unnamed: records.iter().filter(|r| r.has_blank_name()).count(),
        duplicates: graph.duplicate_count(),
    };

    let warnings = warnings_for(&stats);
    if !warnings.is_empty() {
        tracing::warn!(
            total = stats.total,
            orphaned = stats.orphaned,
            cyclic = stats.cyclic,
            warnings = warnings.len(),
            "employee data has integrity issues"
        );
    }

    ValidationReport { warnings, stats }
}

fn warnings_for(stats: &ValidationStats) -> Vec<String> {
    let mut warnings = Vec::new();

    if stats.total > 0 && stats.roots == 0 {
        warnings.push("No employee without a manager was found; the chart has no natural top".into());
    } else if stats.roots > 1 {
        warnings.push(format!(
            "{} employees have no manager and are shown as separate top-level roots",
            stats.roots
        ));
    }
    if stats.orphaned > 0 {
        warnings.push(format!(
            "{} employees reference a manager that is not in the data",
            stats.orphaned
        ));
    }
    if stats.cyclic > 0 {
        warnings.push(format!(
            "{} employees are part of a circular reporting chain",
            stats.cyclic
        ));
    }
    if stats.unnamed > 0 {
        warnings.push(format!("{} employees have a blank name", stats.unnamed));
    }
    if stats.duplicates > 0 {
        warnings.push(format!(
            "{} employees share a name with another employee; only the first is used as a manager",
            stats.duplicates
        ));
    }

    warnings
}
