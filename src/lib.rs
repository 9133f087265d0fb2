//! Org Chart - hierarchy engine for manager-referenced employee lists.
//!
//! Turns a flat list of employee records, each naming its manager, into a
//! navigable forest and keeps the view state around it:
//!
//! - [`validator`] - cycle detection, root/mapped/unmapped classification
//!   and advisory warnings. Never fails, never drops records.
//! - [`tree`] - forest construction with levels and name-sorted siblings.
//! - [`filter`] - org unit / office / level filtering that keeps ancestors.
//! - [`view`] - expand map, focus, visible set and the [`OrgChartState`]
//!   controller.
//! - [`navigation`] - sibling/parent/child lookups and a keyboard
//!   [`Navigator`].
//! - [`search`] - case-insensitive search with breadcrumb paths.
//!
//! ## Example
//!
//! ```
//! use org_chart::{Employee, OrgChartState};
//!
//! let state = OrgChartState::with_records(vec![
//!     Employee::new("CEO", ""),
//!     Employee::new("VP", "CEO"),
//!     Employee::new("Eng", "VP"),
//! ]);
//!
//! let visible: Vec<&str> = state.visible_nodes().iter().map(|n| n.id.as_str()).collect();
//! assert_eq!(visible, vec!["CEO", "VP"]);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod records;
pub mod search;
pub mod tree;
pub mod validator;
pub mod view;

mod graph;

pub use org_chart_types::{Employee, FieldMapping};

pub use config::{OrgChartConfig, RootPolicy, DEFAULT_EXPAND_DEPTH, MAX_EXPAND_DEPTH};
pub use error::{OrgChartError, Result};
pub use filter::{filter_forest, FilterCriteria, FilterOptions, FilterResult};
pub use navigation::{
    parent_of, siblings_and_index, NavCommand, NavOutcome, NavigationConfig, Navigator, Siblings,
};
pub use records::{load_records, records_from_json_str};
pub use search::{search, MatchedField, SearchHit};
pub use tree::{build_forest, count_nodes, max_level, pre_order, Node};
pub use validator::{
    categorize, detect_cycles, validate, Categorization, ValidationReport, ValidationStats,
};
pub use view::{
    descendant_count, find_node, node_path, visible_descendant_count, visible_nodes, ExpandMap,
    OrgChartState,
};
