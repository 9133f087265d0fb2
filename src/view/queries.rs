//! Derived queries over a forest and an expand map.

use super::ExpandMap;
use crate::tree::Node;

/// Flatten the forest into on-screen order.
///
/// Pre-order; every reached node is listed, and its children are walked
/// only while it is expanded.
pub fn visible_nodes<'a>(forest: &'a [Node], expand: &ExpandMap) -> Vec<&'a Node> {
    let mut visible = Vec::new();
    let mut pending: Vec<&Node> = forest.iter().rev().collect();

    while let Some(node) = pending.pop() {
        visible.push(node);
        if expand.is_expanded(&node.id) {
            pending.extend(node.children.iter().rev());
        }
    }
    visible
}

/// All descendants of `node`, regardless of expand state.
pub fn descendant_count(node: &Node) -> usize {
    node.descendant_count()
}

/// Descendants reachable through expanded nodes only; 0 when `node`
/// itself is collapsed.
pub fn visible_descendant_count(node: &Node, expand: &ExpandMap) -> usize {
    if !expand.is_expanded(&node.id) {
        return 0;
    }
    visible_nodes(std::slice::from_ref(node), expand).len() - 1
}

/// First node with `id` in pre-order, `None` if absent.
pub fn find_node<'a>(forest: &'a [Node], id: &str) -> Option<&'a Node> {
    forest.iter().find_map(|root| root.find(id))
}

/// Root-to-node path, node included; empty when `id` is absent.
pub fn node_path<'a>(forest: &'a [Node], id: &str) -> Vec<&'a Node> {
    forest
        .iter()
        .find_map(|root| root.path_to(id))
        .unwrap_or_default()
}
