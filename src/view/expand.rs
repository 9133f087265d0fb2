//! ExpandMap - node id to expanded flag, absence meaning expanded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tree::{pre_order, Node};

/// Expand/collapse state keyed by node id.
///
/// A missing key means expanded; only an explicit `false` collapses.
/// An empty map therefore shows everything. Entries are stored exactly as
/// written and never normalized, so `collapsed_ids` and `len` reflect
/// what operations actually wrote.
///
/// Every operation returns a new map; the receiver is left as it was.
///
/// Equality is on effective state: two maps are equal when every id
/// reads the same through `is_expanded`, so an absent key equals an
/// explicit `true`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandMap {
    entries: BTreeMap<String, bool>,
}

impl ExpandMap {
    /// Empty map: everything expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective state; ids without an entry are expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.entries.get(id) != Some(&false)
    }

    /// The raw entry for `id`, if one was written.
    pub fn entry(&self, id: &str) -> Option<bool> {
        self.entries.get(id).copied()
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids with an explicit `false`.
    pub fn collapsed_ids(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, expanded)| !**expanded)
            .map(|(id, _)| id.as_str())
    }

    /// Flip the effective state of `id`.
    ///
    /// Writes the negation of the current effective state: an absent key
    /// becomes `false`, an explicit `false` becomes `true`. Keys are never
    /// removed.
    #[must_use]
    pub fn toggle(&self, id: &str) -> Self {
        self.with_state(id, !self.is_expanded(id))
    }

    /// Write an explicit state for `id`.
    #[must_use]
    pub fn with_state(&self, id: &str, expanded: bool) -> Self {
        let mut next = self.clone();
        next.entries.insert(id.to_string(), expanded);
        next
    }

    /// Write `true` for every id given, leaving other entries alone.
    #[must_use]
    pub fn reveal<'a, I>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut next = self.clone();
        for id in ids {
            next.entries.insert(id.to_string(), true);
        }
        next
    }

    /// Every node in the forest explicitly expanded.
    pub fn expand_all(forest: &[Node]) -> Self {
        Self::from_nodes(forest, |_| true)
    }

    /// Roots explicitly expanded, every other node collapsed.
    pub fn collapse_all(forest: &[Node]) -> Self {
        let mut map = Self::from_nodes(forest, |_| false);
        for root in forest {
            map.entries.insert(root.id.clone(), true);
        }
        map
    }

    /// Nodes with `level < depth` expanded, the rest collapsed.
    ///
    /// Uses each node's own `level`, counted from the root of the full
    /// forest. Depth 1 expands level 0 only, so roots and their direct
    /// reports are visible and nothing deeper.
    pub fn expand_to_depth(forest: &[Node], depth: usize) -> Self {
        Self::from_nodes(forest, |node| node.level < depth)
    }

    fn from_nodes(forest: &[Node], expanded: impl Fn(&Node) -> bool) -> Self {
        Self {
            entries: pre_order(forest)
                .map(|node| (node.id.clone(), expanded(node)))
                .collect(),
        }
    }
}

impl PartialEq for ExpandMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries
            .keys()
            .chain(other.entries.keys())
            .all(|id| self.is_expanded(id) == other.is_expanded(id))
    }
}

impl Eq for ExpandMap {}
