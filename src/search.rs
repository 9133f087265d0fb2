//! Free-text search over a forest.

use serde::{Deserialize, Serialize};

use crate::tree::Node;

/// Which field produced a hit; first match wins in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedField {
    Name,
    Title,
    OrgUnit,
    Office,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub field: MatchedField,
    /// Ids from the root down to the hit, hit included
    pub path: Vec<String>,
}

/// Case-insensitive substring search over name, title, org unit and
/// office. Hits come back in pre-order; a blank query finds nothing.
pub fn search(forest: &[Node], query: &str) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    let mut path: Vec<&str> = Vec::new();
    let mut pending: Vec<(&Node, usize)> = forest.iter().rev().map(|root| (root, 0)).collect();

    while let Some((node, depth)) = pending.pop() {
        path.truncate(depth);
        path.push(&node.id);

        if let Some(field) = matched_field(node, &needle) {
            hits.push(SearchHit {
                id: node.id.clone(),
                field,
                path: path.iter().map(|id| id.to_string()).collect(),
            });
        }
        pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
    hits
}

fn matched_field(node: &Node, needle: &str) -> Option<MatchedField> {
    let contains = |text: Option<&str>| text.is_some_and(|t| t.to_lowercase().contains(needle));

    if contains(Some(&node.id)) {
        Some(MatchedField::Name)
    } else if contains(node.title()) {
        Some(MatchedField::Title)
    } else if contains(node.org_unit()) {
        Some(MatchedField::OrgUnit)
    } else if contains(node.office()) {
        Some(MatchedField::Office)
    } else {
        None
    }
}
