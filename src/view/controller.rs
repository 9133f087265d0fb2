//! OrgChartState - the single owner of view state.

use std::sync::Arc;

use org_chart_types::Employee;

use super::{find_node, node_path, visible_descendant_count, visible_nodes, ExpandMap};
use crate::config::{OrgChartConfig, RootPolicy};
use crate::filter::{filter_forest, FilterCriteria, FilterOptions, FilterResult};
use crate::search::{search, SearchHit};
use crate::tree::{build_forest, count_nodes, Node};
use crate::validator::{categorize, validate, Categorization, ValidationReport};

/// Controller owning the forest and all view state.
///
/// Every change computes its full derived state (new forest, new expand
/// map, new filtered forest) before storing it, and stored values are
/// replaced rather than edited. The forest sits behind an `Arc` so a
/// presentation layer can detect rebuilds with `Arc::ptr_eq` on
/// [`OrgChartState::forest_handle`].
///
/// Unknown or stale ids are tolerated everywhere: lookups return `None`,
/// empty lists or 0, and commands report `false`.
#[derive(Debug, Clone)]
pub struct OrgChartState {
    config: OrgChartConfig,
    records: Vec<Employee>,
    report: ValidationReport,
    categorization: Categorization,
    forest: Arc<[Node]>,
    expand: ExpandMap,
    focus: Option<String>,
    filter: FilterCriteria,
    filtered: Option<FilterResult>,
}

impl OrgChartState {
    /// Build state for a record list.
    pub fn new(records: Vec<Employee>, config: OrgChartConfig) -> Self {
        let mut state = Self {
            config,
            records: Vec::new(),
            report: ValidationReport::default(),
            categorization: Categorization::default(),
            forest: Arc::from(Vec::new()),
            expand: ExpandMap::new(),
            focus: None,
            filter: FilterCriteria::default(),
            filtered: None,
        };
        state.set_records(records);
        state
    }

    /// Build state with the default config.
    pub fn with_records(records: Vec<Employee>) -> Self {
        Self::new(records, OrgChartConfig::default())
    }

    // =========================================================================
    // DATASET
    // =========================================================================

    /// Replace the records: revalidate, rebuild the forest and reset the
    /// expand map to the configured default depth. Focus and filter are
    /// kept; a focus id missing from the new data is cleared, so the
    /// full forest shows.
    pub fn set_records(&mut self, records: Vec<Employee>) {
        let report = validate(&records);
        let categorization = categorize(&records);
        let forest: Arc<[Node]> = match self.config.root_policy {
            RootPolicy::OrphansAsRoots => build_forest(&records),
            RootPolicy::MappedOnly => build_forest(&categorization.mapped),
        }
        .into();
        let expand = ExpandMap::expand_to_depth(&forest, self.config.initial_expand_depth);

        if let Some(id) = &self.focus {
            if find_node(&forest, id).is_none() {
                tracing::debug!(focus = %id, "focused employee missing after rebuild, clearing focus");
                self.focus = None;
            }
        }

        tracing::debug!(
            records = records.len(),
            roots = forest.len(),
            warnings = report.warnings.len(),
            "rebuilt org chart state"
        );

        self.records = records;
        self.report = report;
        self.categorization = categorization;
        self.forest = forest;
        self.expand = expand;
        self.refresh_filter();
    }

    /// Switch to a different dataset: clears focus and filter, then
    /// rebuilds as [`Self::set_records`] does.
    pub fn switch_dataset(&mut self, records: Vec<Employee>) {
        tracing::info!(records = records.len(), "switching org chart dataset");
        self.focus = None;
        self.filter = FilterCriteria::default();
        self.set_records(records);
    }

    pub fn config(&self) -> &OrgChartConfig {
        &self.config
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn categorization(&self) -> &Categorization {
        &self.categorization
    }

    /// The full forest.
    pub fn forest(&self) -> &[Node] {
        &self.forest
    }

    /// Shared handle to the full forest; a new allocation per rebuild.
    pub fn forest_handle(&self) -> Arc<[Node]> {
        Arc::clone(&self.forest)
    }

    // =========================================================================
    // EXPAND / COLLAPSE
    // =========================================================================

    pub fn expand_map(&self) -> &ExpandMap {
        &self.expand
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expand.is_expanded(id)
    }

    pub fn toggle(&mut self, id: &str) {
        self.expand = self.expand.toggle(id);
    }

    /// Expand `id` if it is collapsed. Returns whether anything changed.
    pub fn expand(&mut self, id: &str) -> bool {
        if self.expand.is_expanded(id) {
            return false;
        }
        self.expand = self.expand.with_state(id, true);
        true
    }

    pub fn expand_all(&mut self) {
        self.expand = ExpandMap::expand_all(&self.forest);
    }

    pub fn collapse_all(&mut self) {
        self.expand = ExpandMap::collapse_all(&self.forest);
    }

    /// Expand levels below `depth` of the full forest, collapse the rest.
    pub fn expand_to_depth(&mut self, depth: usize) {
        self.expand = ExpandMap::expand_to_depth(&self.forest, depth);
    }

    pub fn reset_to_default_expand(&mut self) {
        self.expand_to_depth(self.config.initial_expand_depth);
    }

    /// Expand every ancestor of `id` so it shows up in the visible list.
    /// Returns `false` for an unknown id.
    pub fn reveal(&mut self, id: &str) -> bool {
        let path = node_path(&self.forest, id);
        let Some((_, ancestors)) = path.split_last() else {
            return false;
        };
        self.expand = self.expand.reveal(ancestors.iter().map(|node| node.id.as_str()));
        true
    }

    // =========================================================================
    // FOCUS
    // =========================================================================

    /// Focus the subtree rooted at `id`. Returns `false` (focus unchanged)
    /// for an unknown id.
    pub fn focus(&mut self, id: &str) -> bool {
        if find_node(&self.forest, id).is_none() {
            return false;
        }
        self.focus = Some(id.to_string());
        self.refresh_filter();
        true
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
        self.refresh_filter();
    }

    /// Id of the focused subtree root. Always present in the current
    /// forest: `focus` rejects unknown ids and rebuilds drop stale ones.
    pub fn focused_id(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// The focused node, looked up fresh in the full forest.
    pub fn focused_node(&self) -> Option<&Node> {
        self.focus
            .as_deref()
            .and_then(|id| find_node(&self.forest, id))
    }

    /// The focused node as a one-element forest, or the full forest.
    pub fn active_forest(&self) -> &[Node] {
        match self.focused_node() {
            Some(node) => std::slice::from_ref(node),
            None => &self.forest,
        }
    }

    // =========================================================================
    // FILTER
    // =========================================================================

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.filter = criteria;
        self.refresh_filter();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(FilterCriteria::default());
    }

    /// Picker values drawn from the full forest.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::collect(&self.forest)
    }

    /// The active forest with the current filter applied.
    pub fn display_forest(&self) -> &[Node] {
        match &self.filtered {
            Some(result) => &result.forest,
            None => self.active_forest(),
        }
    }

    /// `(match_count, total_count)` for the current filter.
    pub fn filter_counts(&self) -> (usize, usize) {
        match &self.filtered {
            Some(result) => (result.match_count, result.total_count),
            None => {
                let total = count_nodes(self.active_forest());
                (total, total)
            }
        }
    }

    fn refresh_filter(&mut self) {
        self.filtered = self
            .filter
            .is_active()
            .then(|| filter_forest(self.active_forest(), &self.filter));
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Display forest flattened through the expand map.
    pub fn visible_nodes(&self) -> Vec<&Node> {
        visible_nodes(self.display_forest(), &self.expand)
    }

    /// Lookup in the full forest.
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        find_node(&self.forest, id)
    }

    /// Root-to-node path in the full forest (breadcrumbs).
    pub fn node_path(&self, id: &str) -> Vec<&Node> {
        node_path(&self.forest, id)
    }

    /// Descendants of `id` as displayed (focus and filter applied).
    pub fn descendant_count(&self, id: &str) -> usize {
        find_node(self.display_forest(), id).map_or(0, Node::descendant_count)
    }

    /// Visible descendants of `id` as displayed.
    pub fn visible_descendant_count(&self, id: &str) -> usize {
        find_node(self.display_forest(), id)
            .map_or(0, |node| visible_descendant_count(node, &self.expand))
    }

    /// Search the full forest.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        search(&self.forest, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXPAND_DEPTH;
    use crate::navigation::{NavCommand, NavOutcome, Navigator};
    use pretty_assertions::assert_eq;

    fn records() -> Vec<Employee> {
        vec![
            Employee::new("CEO", "").with_org_unit("Exec"),
            Employee::new("VP Eng", "CEO").with_org_unit("Eng"),
            Employee::new("VP Sales", "CEO").with_org_unit("Sales"),
            Employee::new("Dev", "VP Eng").with_org_unit("Eng"),
            Employee::new("Rep", "VP Sales").with_org_unit("Sales"),
            Employee::new("Bob", "Nonexistent").with_org_unit("Eng"),
        ]
    }

    fn visible(state: &OrgChartState) -> Vec<&str> {
        state
            .visible_nodes()
            .into_iter()
            .map(|n| n.id.as_str())
            .collect()
    }

    #[test]
    fn test_default_expand_depth() {
        let state = OrgChartState::with_records(records());
        assert_eq!(visible(&state), vec!["Bob", "CEO", "VP Eng", "VP Sales"]);
        assert_eq!(state.report().stats.orphaned, 1);
    }

    #[test]
    fn test_mapped_only_policy() {
        let config = OrgChartConfig::default().with_root_policy(RootPolicy::MappedOnly);
        let state = OrgChartState::new(records(), config);
        assert_eq!(state.forest().len(), 1);
        assert_eq!(state.forest()[0].id, "CEO");
    }

    #[test]
    fn test_toggle_and_bulk_operations() {
        let mut state = OrgChartState::with_records(records());

        state.toggle("VP Eng");
        assert!(state.is_expanded("VP Eng"));
        assert!(visible(&state).contains(&"Dev"));

        state.collapse_all();
        assert_eq!(visible(&state), vec!["Bob", "CEO", "VP Eng", "VP Sales"]);

        state.expand_all();
        assert_eq!(visible(&state).len(), 6);

        state.reset_to_default_expand();
        assert!(!state.is_expanded("VP Eng"));
    }

    #[test]
    fn test_expand_only_writes_when_collapsed() {
        let mut state = OrgChartState::with_records(records());
        assert!(state.expand("VP Eng"));
        assert!(!state.expand("VP Eng"));
        assert!(!state.expand("CEO"));
    }

    #[test]
    fn test_focus() {
        let mut state = OrgChartState::with_records(records());

        assert!(state.focus("VP Sales"));
        assert_eq!(state.active_forest().len(), 1);
        assert_eq!(state.active_forest()[0].id, "VP Sales");
        // Level 1 is collapsed by the default depth
        assert_eq!(visible(&state), vec!["VP Sales"]);

        state.expand_to_depth(2);
        assert_eq!(visible(&state), vec!["VP Sales", "Rep"]);

        assert!(!state.focus("ghost"));
        assert_eq!(state.focused_id(), Some("VP Sales"));

        state.clear_focus();
        assert_eq!(state.active_forest().len(), 2);
    }

    #[test]
    fn test_filter_with_focus() {
        let mut state = OrgChartState::with_records(records());
        state.expand_all();
        state.set_filter(FilterCriteria::new().with_org_unit("Eng"));

        assert_eq!(visible(&state), vec!["Bob", "CEO", "VP Eng", "Dev"]);
        assert_eq!(state.filter_counts(), (3, 6));

        state.focus("VP Eng");
        assert_eq!(visible(&state), vec!["VP Eng", "Dev"]);
        assert_eq!(state.filter_counts(), (2, 2));

        state.clear_filter();
        assert_eq!(state.filter_counts(), (2, 2));
        assert_eq!(state.descendant_count("VP Eng"), 1);
    }

    #[test]
    fn test_counts_follow_display_forest() {
        let mut state = OrgChartState::with_records(records());
        assert_eq!(state.descendant_count("CEO"), 4);
        assert_eq!(state.visible_descendant_count("CEO"), 2);

        state.set_filter(FilterCriteria::new().with_org_unit("Sales"));
        assert_eq!(state.descendant_count("CEO"), 2);
        assert_eq!(state.descendant_count("ghost"), 0);
    }

    #[test]
    fn test_set_records_keeps_focus_and_filter() {
        let mut state = OrgChartState::with_records(records());
        let before = state.forest_handle();
        state.focus("VP Eng");
        state.set_filter(FilterCriteria::new().with_office("Remote"));

        state.set_records(records());
        assert!(!Arc::ptr_eq(&before, &state.forest_handle()));
        assert_eq!(state.focused_id(), Some("VP Eng"));
        assert!(state.filter().is_active());

        state.switch_dataset(vec![Employee::new("Solo", "")]);
        assert_eq!(state.focused_id(), None);
        assert!(!state.filter().is_active());
        assert_eq!(visible(&state), vec!["Solo"]);
    }

    #[test]
    fn test_stale_focus_is_cleared_on_rebuild() {
        let mut state = OrgChartState::with_records(records());
        state.focus("Rep");
        state.set_records(vec![Employee::new("Other", "")]);

        assert_eq!(state.focused_id(), None);
        assert_eq!(state.focused_node(), None);
        assert_eq!(state.active_forest().len(), 1);
        assert_eq!(state.active_forest()[0].id, "Other");

        // Nothing left for Escape to exit
        let mut nav = Navigator::new();
        assert_eq!(nav.apply(&mut state, NavCommand::Escape), NavOutcome::Unchanged);
    }

    #[test]
    fn test_rebuild_resets_expand_state() {
        let mut state = OrgChartState::with_records(records());
        let default_map = state.expand_map().clone();

        state.expand_all();
        assert!(state.is_expanded("VP Eng"));
        state.set_records(records());
        assert!(!state.is_expanded("VP Eng"));
        assert_eq!(state.expand_map(), &default_map);
        assert_eq!(visible(&state), vec!["Bob", "CEO", "VP Eng", "VP Sales"]);

        state.expand_all();
        state.switch_dataset(records());
        assert!(!state.is_expanded("VP Sales"));
        assert_eq!(
            state.expand_map(),
            &ExpandMap::expand_to_depth(state.forest(), DEFAULT_EXPAND_DEPTH)
        );

        let config = OrgChartConfig::default().with_initial_expand_depth(2);
        let mut deep = OrgChartState::new(records(), config);
        deep.collapse_all();
        assert!(!deep.is_expanded("VP Eng"));
        deep.set_records(records());
        assert_eq!(
            visible(&deep),
            vec!["Bob", "CEO", "VP Eng", "Dev", "VP Sales", "Rep"]
        );
    }

    #[test]
    fn test_reveal() {
        let mut state = OrgChartState::with_records(records());
        state.collapse_all();
        assert!(!visible(&state).contains(&"Rep"));

        assert!(state.reveal("Rep"));
        assert!(visible(&state).contains(&"Rep"));
        assert!(!visible(&state).contains(&"Dev"));
        assert!(!state.reveal("ghost"));
    }

    #[test]
    fn test_path_and_lookup() {
        let state = OrgChartState::with_records(records());
        let path: Vec<&str> = state
            .node_path("Dev")
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(path, vec!["CEO", "VP Eng", "Dev"]);
        assert!(state.find_node("ghost").is_none());
        assert_eq!(state.filter_options().org_units, vec!["Eng", "Exec", "Sales"]);
    }
}
