//! Org forest - nodes and construction.
//!
//! A forest is an ordered list of root [`Node`]s. It is built once per
//! record list by [`build_forest`] and treated as an immutable value:
//! filtering produces a new forest instead of editing this one.

mod builder;
mod node;

pub use builder::build_forest;
pub use node::{Node, PreOrder};

/// Pre-order walk over every node of a forest.
pub fn pre_order(forest: &[Node]) -> PreOrder<'_> {
    PreOrder::new(forest)
}

/// Total node count of a forest.
pub fn count_nodes(forest: &[Node]) -> usize {
    forest.iter().map(|root| 1 + root.descendant_count()).sum()
}

/// Deepest level present, `None` for an empty forest.
pub fn max_level(forest: &[Node]) -> Option<usize> {
    pre_order(forest).map(|node| node.level).max()
}
