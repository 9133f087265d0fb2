//! Root / mapped / unmapped classification.

use std::collections::VecDeque;

use org_chart_types::Employee;
use serde::{Deserialize, Serialize};

use super::cycle_members;
use crate::graph::ManagerGraph;

/// Records partitioned by how their manager chain resolves.
///
/// `mapped` and `unmapped` keep their narrow meaning: `mapped` is what a
/// clean tree shows, `unmapped` is "manager not found". Records that are
/// neither (loop participants and records hanging below an unmapped or
/// looping record) are listed in `cyclic` and `stranded` so they never
/// silently disappear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Categorization {
    /// Reachable from a true root, roots included. Input order.
    pub mapped: Vec<Employee>,

    /// Non-blank manager reference that matches no record.
    pub unmapped: Vec<Employee>,

    /// Blank or whitespace-only manager reference.
    pub true_roots: Vec<Employee>,

    /// On a manager-reference loop.
    pub cyclic: Vec<Employee>,

    /// Manager resolves, but the chain ends at an unmapped or looping record.
    pub stranded: Vec<Employee>,
}

impl Categorization {
    /// Records that need fixing before they fit in the tree.
    pub fn needs_attention(&self) -> usize {
        self.unmapped.len() + self.cyclic.len() + self.stranded.len()
    }
}

/// Partition records by manager-chain resolution.
///
/// `mapped` is computed breadth-first from the true roots through a
/// manager-to-children index, so anything whose ancestry does not bottom
/// out at a true root is excluded from it.
pub fn categorize(records: &[Employee]) -> Categorization {
    let graph = ManagerGraph::new(records);
    let children = graph.children();
    let on_cycle = cycle_members(&graph);

    let mut reached = vec![false; records.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    for (i, record) in records.iter().enumerate() {
        if !record.has_manager() {
            reached[i] = true;
            queue.push_back(i);
        }
    }
    while let Some(i) = queue.pop_front() {
        for &child in &children[i] {
            if !reached[child] {
                reached[child] = true;
                queue.push_back(child);
            }
        }
    }

    let mut result = Categorization::default();
    for (i, record) in records.iter().enumerate() {
        if !record.has_manager() {
            result.true_roots.push(record.clone());
        }

        if reached[i] {
            result.mapped.push(record.clone());
        } else if record
            .manager_ref()
            .is_some_and(|manager| graph.lookup(manager).is_none())
        {
            result.unmapped.push(record.clone());
        } else if on_cycle[i] {
            result.cyclic.push(record.clone());
        } else {
            result.stranded.push(record.clone());
        }
    }

    tracing::debug!(
        total = records.len(),
        mapped = result.mapped.len(),
        unmapped = result.unmapped.len(),
        cyclic = result.cyclic.len(),
        stranded = result.stranded.len(),
        "categorized employee records"
    );

    result
}
