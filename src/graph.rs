//! Index-based view of the manager-reference graph.
//!
//! Every record points at most at one manager, so the graph is functional:
//! one optional parent index per record. Shared by the validator and the
//! tree builder so both resolve names the same way.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use org_chart_types::Employee;

pub(crate) struct ManagerGraph<'a> {
    index: HashMap<&'a str, usize>,
    parents: Vec<Option<usize>>,
    duplicates: usize,
}

impl<'a> ManagerGraph<'a> {
    /// Resolve every manager reference against the record names.
    ///
    /// Duplicate names resolve to their first occurrence.
    pub(crate) fn new(records: &'a [Employee]) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        let mut duplicates = 0;

        for (i, record) in records.iter().enumerate() {
            match index.entry(record.name.as_str()) {
                Entry::Occupied(_) => {
                    if !record.has_blank_name() {
                        duplicates += 1;
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
            }
        }

        let parents = records
            .iter()
            .map(|record| record.manager_ref().and_then(|m| index.get(m).copied()))
            .collect();

        Self {
            index,
            parents,
            duplicates,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.parents.len()
    }

    /// Parent index; `Some(i)` for a self-reference.
    pub(crate) fn parent(&self, i: usize) -> Option<usize> {
        self.parents.get(i).copied().flatten()
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Records whose non-blank name repeats an earlier record's name.
    pub(crate) fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    /// Child indices per record, in input order. Self-references are
    /// not children of themselves.
    pub(crate) fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.len()];
        for (i, parent) in self.parents.iter().enumerate() {
            if let Some(p) = *parent {
                if p != i {
                    children[p].push(i);
                }
            }
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution() {
        let records = vec![
            Employee::new("A", ""),
            Employee::new("B", "A"),
            Employee::new("C", "Ghost"),
            Employee::new("D", "D"),
            Employee::new("A", "B"),
        ];
        let graph = ManagerGraph::new(&records);

        assert_eq!(graph.parent(0), None);
        assert_eq!(graph.parent(1), Some(0));
        assert_eq!(graph.parent(2), None);
        assert_eq!(graph.parent(3), Some(3));
        assert_eq!(graph.parent(4), Some(1));
        assert_eq!(graph.lookup("A"), Some(0));
        assert_eq!(graph.duplicate_count(), 1);
        assert_eq!(graph.children()[0], vec![1]);
        assert!(graph.children()[3].is_empty());
    }
}
