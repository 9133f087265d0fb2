//! Forest construction from a flat record list.

use std::collections::VecDeque;

use org_chart_types::Employee;

use super::node::Node;
use crate::graph::ManagerGraph;
use crate::validator::cycle_members;

/// Build the org forest from a record list.
///
/// A record becomes a child when its manager reference resolves to a
/// different record in `records`; otherwise it becomes a root. Which
/// records become roots is therefore decided by what the caller passes in
/// (the mapped subset, or everything).
///
/// Records on a manager-reference loop are also made roots, so every
/// record ends up in exactly one node reachable from exactly one root
/// whatever the input looks like. Roots and every sibling list are sorted
/// ascending by id (byte-wise, case-sensitive); equal ids keep input order.
pub fn build_forest(records: &[Employee]) -> Vec<Node> {
    let graph = ManagerGraph::new(records);
    let on_cycle = cycle_members(&graph);

    let by_name = |a: &usize, b: &usize| records[*a].name.cmp(&records[*b].name);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots: Vec<usize> = Vec::new();
    for i in 0..records.len() {
        match graph.parent(i) {
            Some(p) if p != i && !on_cycle[i] => children[p].push(i),
            _ => roots.push(i),
        }
    }
    roots.sort_by(by_name);
    for list in &mut children {
        list.sort_by(by_name);
    }

    // Levels top-down, then assemble bottom-up in reverse BFS order so
    // every child node exists before its parent claims it.
    let mut level = vec![0usize; records.len()];
    let mut order: Vec<usize> = Vec::with_capacity(records.len());
    let mut queue: VecDeque<usize> = roots.iter().copied().collect();
    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &child in &children[i] {
            level[child] = level[i] + 1;
            queue.push_back(child);
        }
    }

    let mut slots: Vec<Option<Node>> = vec![None; records.len()];
    for &i in order.iter().rev() {
        let mut node = Node::new(records[i].clone(), level[i]);
        node.children = children[i]
            .iter()
            .filter_map(|&child| slots[child].take())
            .collect();
        slots[i] = Some(node);
    }

    let forest: Vec<Node> = roots
        .iter()
        .filter_map(|&root| slots[root].take())
        .collect();

    tracing::debug!(
        records = records.len(),
        roots = forest.len(),
        "built org forest"
    );

    forest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::count_nodes;

    fn ids(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_chain() {
        let records = vec![
            Employee::new("CEO", ""),
            Employee::new("VP", "CEO"),
            Employee::new("Eng1", "VP"),
        ];
        let forest = build_forest(&records);

        assert_eq!(ids(&forest), vec!["CEO"]);
        let vp = &forest[0].children[0];
        let eng = &vp.children[0];
        assert_eq!((forest[0].level, vp.level, eng.level), (0, 1, 2));
        assert_eq!(vp.parent_id.as_deref(), Some("CEO"));
        assert_eq!(eng.id, "Eng1");
    }

    #[test]
    fn test_child_listed_before_parent() {
        let records = vec![
            Employee::new("Eng1", "VP"),
            Employee::new("VP", "CEO"),
            Employee::new("CEO", ""),
        ];
        let forest = build_forest(&records);
        assert_eq!(forest[0].children[0].children[0].level, 2);
    }

    #[test]
    fn test_siblings_sorted() {
        let records = vec![
            Employee::new("Boss", ""),
            Employee::new("charlie", "Boss"),
            Employee::new("Bravo", "Boss"),
            Employee::new("Alpha", "Boss"),
        ];
        let forest = build_forest(&records);
        // Byte order: uppercase sorts before lowercase
        assert_eq!(ids(&forest[0].children), vec!["Alpha", "Bravo", "charlie"]);
    }

    #[test]
    fn test_dangling_manager_becomes_root() {
        let records = vec![Employee::new("Bob", "Nonexistent")];
        let forest = build_forest(&records);
        assert_eq!(ids(&forest), vec!["Bob"]);
        assert_eq!(forest[0].level, 0);
        assert_eq!(forest[0].parent_id.as_deref(), Some("Nonexistent"));
    }

    #[test]
    fn test_cycles_degrade_to_roots() {
        let records = vec![
            Employee::new("X", "Y"),
            Employee::new("Y", "X"),
            Employee::new("W", "X"),
            Employee::new("Me", "Me"),
        ];
        let forest = build_forest(&records);

        assert_eq!(ids(&forest), vec!["Me", "X", "Y"]);
        assert_eq!(ids(&forest[1].children), vec!["W"]);
        assert_eq!(forest[1].children[0].level, 1);
        assert_eq!(count_nodes(&forest), 4);
    }

    #[test]
    fn test_multiple_roots_sorted() {
        let records = vec![Employee::new("Zed", ""), Employee::new("Amy", "")];
        assert_eq!(ids(&build_forest(&records)), vec!["Amy", "Zed"]);
    }

    #[test]
    fn test_empty() {
        assert!(build_forest(&[]).is_empty());
    }
}
