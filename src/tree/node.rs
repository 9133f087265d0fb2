//! Node - one employee placed in the hierarchy.

use org_chart_types::Employee;
use serde::{Deserialize, Serialize};

/// One employee record positioned in the forest.
///
/// Children are exclusively owned and kept sorted ascending by `id`.
///
/// Every walk over a node (queries, clone, equality, drop) uses an
/// explicit work list, so chain depth is bounded by heap, not stack.
#[derive(Debug, Serialize, Deserialize)]
pub struct Node {
    /// The record's display name
    pub id: String,

    /// The record's manager reference, `None` when blank.
    ///
    /// Kept as written even when it did not resolve and the node became
    /// a root.
    pub parent_id: Option<String>,

    /// Depth in tree (0 = root)
    pub level: usize,

    /// Direct reports, sorted by id
    pub children: Vec<Node>,

    /// The wrapped record
    pub payload: Employee,
}

impl Node {
    /// Wrap a record as a childless node at the given level.
    pub fn new(payload: Employee, level: usize) -> Self {
        Self {
            id: payload.name.clone(),
            parent_id: payload.manager_ref().map(str::to_string),
            level,
            children: Vec::new(),
            payload,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.payload.title.as_deref()
    }

    pub fn org_unit(&self) -> Option<&str> {
        self.payload.org_unit.as_deref()
    }

    pub fn office(&self) -> Option<&str> {
        self.payload.office.as_deref()
    }

    /// Total descendants, independent of view state
    pub fn descendant_count(&self) -> usize {
        self.iter().count() - 1
    }

    /// Find a node by id in this subtree (pre-order, first match)
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.iter().find(|node| node.id == id)
    }

    /// Path from this node down to `id`, both ends included
    pub fn path_to(&self, id: &str) -> Option<Vec<&Node>> {
        let mut path: Vec<&Node> = Vec::new();
        let mut pending = vec![(self, 0usize)];

        while let Some((node, depth)) = pending.pop() {
            path.truncate(depth);
            path.push(node);
            if node.id == id {
                return Some(path);
            }
            pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        None
    }

    /// Copy of this subtree keeping only the descendants `keep` accepts.
    ///
    /// `keep(node, has_kept_children)` is called once per descendant,
    /// children before parents; a rejected node drops its whole copied
    /// subtree. The root itself is always copied.
    pub(crate) fn copy_retaining<F>(&self, mut keep: F) -> Node
    where
        F: FnMut(&Node, bool) -> bool,
    {
        // Pre-order with parent positions: walking it backwards reaches
        // every node after all of its descendants.
        let mut order: Vec<(&Node, usize)> = Vec::new();
        let mut pending = vec![(self, 0usize)];
        while let Some((node, parent)) = pending.pop() {
            let position = order.len();
            order.push((node, parent));
            pending.extend(node.children.iter().rev().map(|child| (child, position)));
        }

        let mut kept: Vec<Vec<Node>> = (0..order.len()).map(|_| Vec::new()).collect();
        for position in (1..order.len()).rev() {
            let (node, parent) = order[position];
            let children = std::mem::take(&mut kept[position]);
            if keep(node, !children.is_empty()) {
                kept[parent].push(node.with_children(children));
            }
        }

        let children = kept.swap_remove(0);
        self.with_children(children)
    }

    /// Same node, given children (collected in reverse sibling order).
    fn with_children(&self, mut children: Vec<Node>) -> Node {
        children.reverse();
        Node {
            id: self.id.clone(),
            parent_id: self.parent_id.clone(),
            level: self.level,
            children,
            payload: self.payload.clone(),
        }
    }

    /// Pre-order walk over this subtree
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(std::slice::from_ref(self))
    }
}

/// Pre-order iterator over a forest or subtree.
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(forest: &'a [Node]) -> Self {
        Self {
            stack: forest.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        self.copy_retaining(|_, _| true)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.id != b.id
                || a.parent_id != b.parent_id
                || a.level != b.level
                || a.payload != b.payload
                || a.children.len() != b.children.len()
            {
                return false;
            }
            pending.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
