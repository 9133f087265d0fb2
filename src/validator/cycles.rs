//! Cycle detection over the manager-reference graph.

use std::collections::BTreeSet;

use org_chart_types::Employee;

use crate::graph::ManagerGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnStack,
    Done,
}

/// Ids of every record that sits on a manager-reference loop.
///
/// Self-references count as a loop of one. Records that merely point
/// into a loop are not participants.
pub fn detect_cycles(records: &[Employee]) -> BTreeSet<String> {
    let graph = ManagerGraph::new(records);
    records
        .iter()
        .zip(cycle_members(&graph))
        .filter(|(_, on_cycle)| *on_cycle)
        .map(|(record, _)| record.name.clone())
        .collect()
}

/// Per-record loop membership.
///
/// Walks each unvisited record up its manager chain, keeping the current
/// walk on a stack. Reaching a record already on the stack closes a loop:
/// everything from that record to the top of the stack is on it. Reaching
/// a finished record stops the walk. Each record is pushed once, so the
/// whole pass is linear and needs no recursion.
pub(crate) fn cycle_members(graph: &ManagerGraph<'_>) -> Vec<bool> {
    let n = graph.len();
    let mut state = vec![Visit::Unseen; n];
    let mut on_cycle = vec![false; n];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..n {
        if state[start] != Visit::Unseen {
            continue;
        }

        let mut current = Some(start);
        while let Some(i) = current {
            match state[i] {
                Visit::Done => break,
                Visit::OnStack => {
                    if let Some(pos) = path.iter().position(|&p| p == i) {
                        for &member in &path[pos..] {
                            on_cycle[member] = true;
                        }
                    }
                    break;
                }
                Visit::Unseen => {
                    state[i] = Visit::OnStack;
                    path.push(i);
                    current = graph.parent(i);
                }
            }
        }

        for i in path.drain(..) {
            state[i] = Visit::Done;
        }
    }

    on_cycle
}
