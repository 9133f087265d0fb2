//! View state - expand/collapse, focus and the derived visible set.
//!
//! Two layers:
//! - Pure values and functions (`ExpandMap`, `visible_nodes`, counts,
//!   lookups) that take a forest and return new values.
//! - `OrgChartState`, the single controller that owns records, forest,
//!   expand map, focus and filter, and recomputes derived state eagerly
//!   on every change.
//!
//! ```text
//! records ──► validate / categorize ──► build_forest ──► Arc<[Node]>
//!                                                           │ focus
//!                                                           ▼
//!                                   filter_forest ◄── active forest
//!                                        │
//!                                        ▼
//!                  display forest ──► visible_nodes(expand map)
//! ```

mod controller;
mod expand;
mod queries;

pub use controller::OrgChartState;
pub use expand::ExpandMap;
pub use queries::{
    descendant_count, find_node, node_path, visible_descendant_count, visible_nodes,
};
