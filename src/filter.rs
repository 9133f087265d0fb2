//! Filter engine - criteria matching and ancestor-preserving pruning.
//!
//! Filtering never touches its input forest. It returns a new forest that
//! keeps every directly matching node plus the ancestors needed to reach
//! it, so breadcrumbs and tree continuity survive.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::tree::{count_nodes, pre_order, Node};

// =============================================================================
// CRITERIA
// =============================================================================

/// Inclusion criteria. Active criteria are ANDed; values inside one
/// criterion are ORed (multi-select).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Allowed org units; empty = any
    pub org_units: BTreeSet<String>,

    /// Allowed offices; empty = any
    pub offices: BTreeSet<String>,

    /// Keep levels strictly below this; `None` or `Some(0)` = no cap
    pub max_level: Option<usize>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org_unit(mut self, org_unit: impl Into<String>) -> Self {
        self.org_units.insert(org_unit.into());
        self
    }

    pub fn with_office(mut self, office: impl Into<String>) -> Self {
        self.offices.insert(office.into());
        self
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = Some(max_level);
        self
    }

    /// Effective level cap; zero means none.
    pub fn level_cap(&self) -> Option<usize> {
        self.max_level.filter(|&cap| cap > 0)
    }

    /// Does any criterion restrict the forest?
    pub fn is_active(&self) -> bool {
        !self.org_units.is_empty() || !self.offices.is_empty() || self.level_cap().is_some()
    }

    /// Does this node match on its own (ignoring descendants)?
    pub fn matches(&self, node: &Node) -> bool {
        let level_ok = self.level_cap().map_or(true, |cap| node.level < cap);
        let org_ok = self.org_units.is_empty()
            || node.org_unit().is_some_and(|o| self.org_units.contains(o));
        let office_ok =
            self.offices.is_empty() || node.office().is_some_and(|o| self.offices.contains(o));

        level_ok && org_ok && office_ok
    }
}

// =============================================================================
// PRUNING
// =============================================================================

/// Outcome of [`filter_forest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    /// Matching nodes plus their ancestors
    pub forest: Vec<Node>,

    /// Nodes that matched directly (ancestor scaffolding excluded)
    pub match_count: usize,

    /// Nodes visited
    pub total_count: usize,
}

/// Filter a forest (full or focused) by `criteria`.
///
/// With no active criterion the forest passes through unchanged and
/// every node counts as a match.
pub fn filter_forest(forest: &[Node], criteria: &FilterCriteria) -> FilterResult {
    if !criteria.is_active() {
        let total = count_nodes(forest);
        return FilterResult {
            forest: forest.to_vec(),
            match_count: total,
            total_count: total,
        };
    }

    let mut match_count = 0;
    let mut total_count = 0;
    let mut retain = |node: &Node, has_kept_children: bool| {
        total_count += 1;
        let matched = criteria.matches(node);
        if matched {
            match_count += 1;
        }
        matched || has_kept_children
    };

    // Post-order: a node stays if it matches or any child survived.
    let filtered: Vec<Node> = forest
        .iter()
        .filter_map(|root| {
            let copy = root.copy_retaining(&mut retain);
            retain(root, !copy.children.is_empty()).then_some(copy)
        })
        .collect();
    let result = FilterResult {
        forest: filtered,
        match_count,
        total_count,
    };

    tracing::debug!(
        matched = result.match_count,
        total = result.total_count,
        kept_roots = result.forest.len(),
        "filtered org forest"
    );

    result
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Values available for the host's filter pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Distinct org units, sorted
    pub org_units: Vec<String>,

    /// Distinct offices, sorted
    pub offices: Vec<String>,

    /// Deepest level present (0 for an empty forest)
    pub max_level: usize,
}

impl FilterOptions {
    pub fn collect(forest: &[Node]) -> Self {
        let mut org_units = BTreeSet::new();
        let mut offices = BTreeSet::new();
        let mut max_level = 0;

        for node in pre_order(forest) {
            if let Some(org_unit) = node.org_unit() {
                org_units.insert(org_unit.to_string());
            }
            if let Some(office) = node.office() {
                offices.insert(office.to_string());
            }
            max_level = max_level.max(node.level);
        }

        Self {
            org_units: org_units.into_iter().collect(),
            offices: offices.into_iter().collect(),
            max_level,
        }
    }
}
