//! End-to-end flows through the public API.

use org_chart::{
    build_forest, categorize, filter_forest, validate, visible_descendant_count, visible_nodes,
    Employee, ExpandMap, FilterCriteria, NavCommand, NavOutcome, Navigator, OrgChartConfig,
    OrgChartState, RootPolicy,
};
use pretty_assertions::assert_eq;

fn ids<'a>(nodes: impl IntoIterator<Item = &'a org_chart::Node>) -> Vec<&'a str> {
    nodes.into_iter().map(|n| n.id.as_str()).collect()
}

fn names(records: &[Employee]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn chain_builds_and_expands_to_depth_one() {
    let records = vec![
        Employee::new("CEO", ""),
        Employee::new("VP", "CEO"),
        Employee::new("Eng1", "VP"),
    ];

    let forest = build_forest(&records);
    assert_eq!(forest.len(), 1);
    let ceo = &forest[0];
    let vp = &ceo.children[0];
    let eng = &vp.children[0];
    assert_eq!(
        [(&*ceo.id, ceo.level), (&*vp.id, vp.level), (&*eng.id, eng.level)],
        [("CEO", 0), ("VP", 1), ("Eng1", 2)]
    );

    let expand = ExpandMap::expand_to_depth(&forest, 1);
    assert_eq!(ids(visible_nodes(&forest, &expand)), vec!["CEO", "VP"]);
    assert_eq!(ceo.descendant_count(), 2);

    let report = validate(&records);
    assert!(report.is_clean());
    assert_eq!(report.stats.roots, 1);
}

#[test]
fn mutual_managers_are_contained() {
    let records = vec![
        Employee::new("X", "Y"),
        Employee::new("Y", "X"),
        Employee::new("Z", ""),
    ];

    let categories = categorize(&records);
    assert_eq!(names(&categories.true_roots), vec!["Z"]);
    assert!(!names(&categories.mapped).contains(&"X"));
    assert!(!names(&categories.mapped).contains(&"Y"));
    assert!(categories.unmapped.is_empty());
    assert_eq!(names(&categories.cyclic), vec!["X", "Y"]);

    let report = validate(&records);
    assert_eq!(report.stats.cyclic, 2);
    assert!(report.warnings.iter().any(|w| w.contains("circular")));

    // Cycles still render: every record shows up exactly once
    let forest = build_forest(&records);
    assert_eq!(org_chart::count_nodes(&forest), 3);
}

#[test]
fn dangling_manager_becomes_root_unless_mapped_only() {
    let records = vec![
        Employee::new("CEO", ""),
        Employee::new("Bob", "Nonexistent"),
    ];

    let categories = categorize(&records);
    assert_eq!(names(&categories.unmapped), vec!["Bob"]);
    assert_eq!(ids(&build_forest(&records[1..])), vec!["Bob"]);

    let lenient = OrgChartState::with_records(records.clone());
    assert_eq!(ids(lenient.forest()), vec!["Bob", "CEO"]);

    let strict = OrgChartState::new(
        records,
        OrgChartConfig::default().with_root_policy(RootPolicy::MappedOnly),
    );
    assert_eq!(ids(strict.forest()), vec!["CEO"]);
    assert_eq!(strict.report().stats.orphaned, 1);
}

#[test]
fn filter_keeps_ancestors_of_matches() {
    let records = vec![
        Employee::new("A", "").with_org_unit("Sales"),
        Employee::new("B", "A").with_org_unit("Eng"),
        Employee::new("C", "B").with_org_unit("Eng"),
    ];
    let forest = build_forest(&records);

    let result = filter_forest(&forest, &FilterCriteria::new().with_org_unit("Eng"));
    assert_eq!(result.match_count, 2);
    assert_eq!(result.total_count, 3);
    let all = ExpandMap::expand_all(&result.forest);
    assert_eq!(ids(visible_nodes(&result.forest, &all)), vec!["A", "B", "C"]);

    // Original forest untouched
    assert_eq!(forest[0].descendant_count(), 2);
}

#[test]
fn visible_descendant_count_follows_expand_state() {
    let records = vec![
        Employee::new("Root", ""),
        Employee::new("L", "Root"),
        Employee::new("R", "Root"),
        Employee::new("L1", "L"),
        Employee::new("R1", "R"),
    ];
    let forest = build_forest(&records);
    let root = &forest[0];

    assert_eq!(root.descendant_count(), 4);
    let collapsed = ExpandMap::new().with_state("Root", false);
    assert_eq!(visible_descendant_count(root, &collapsed), 0);
    let shallow = ExpandMap::expand_to_depth(&forest, 1);
    assert_eq!(visible_descendant_count(root, &shallow), 2);
    assert_eq!(visible_descendant_count(root, &ExpandMap::new()), 4);
}

#[test]
fn keyboard_session() {
    let records = vec![
        Employee::new("CEO", "").with_org_unit("Exec"),
        Employee::new("CTO", "CEO").with_org_unit("Eng"),
        Employee::new("CFO", "CEO").with_org_unit("Finance"),
        Employee::new("Dev", "CTO").with_org_unit("Eng"),
    ];
    let mut state = OrgChartState::with_records(records);
    let mut nav = Navigator::new();

    assert_eq!(nav.handle_key(&mut state, "ArrowDown"), NavOutcome::Selected("CEO".into()));
    assert_eq!(nav.handle_key(&mut state, "ArrowDown"), NavOutcome::Selected("CFO".into()));
    assert_eq!(nav.handle_key(&mut state, "ArrowRight"), NavOutcome::Selected("CTO".into()));
    assert_eq!(nav.handle_key(&mut state, "ArrowDown"), NavOutcome::Selected("Dev".into()));
    assert!(state.is_expanded("CTO"));

    nav.apply(&mut state, NavCommand::Parent);
    assert_eq!(nav.handle_key(&mut state, "f"), NavOutcome::Focused("CTO".into()));
    assert_eq!(ids(state.visible_nodes()), vec!["CTO", "Dev"]);

    state.set_filter(FilterCriteria::new().with_org_unit("Finance"));
    assert!(state.visible_nodes().is_empty());
    assert_eq!(state.filter_counts(), (0, 2));

    assert_eq!(nav.handle_key(&mut state, "Escape"), NavOutcome::SelectionCleared);
    assert_eq!(nav.handle_key(&mut state, "Escape"), NavOutcome::FocusCleared);
    assert_eq!(ids(state.visible_nodes()), vec!["CEO", "CFO"]);
}

#[test]
fn search_then_reveal() {
    let records = vec![
        Employee::new("CEO", ""),
        Employee::new("VP", "CEO"),
        Employee::new("Eng1", "VP").with_office("Lisbon"),
    ];
    let mut state = OrgChartState::with_records(records);
    assert!(!ids(state.visible_nodes()).contains(&"Eng1"));

    let hits = state.search("lisbon");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, vec!["CEO", "VP", "Eng1"]);

    assert!(state.reveal(&hits[0].id));
    assert_eq!(ids(state.visible_nodes()), vec!["CEO", "VP", "Eng1"]);
}

#[test]
fn hundred_thousand_deep_chain() {
    let len = 100_000;
    let records: Vec<Employee> = (0..len)
        .map(|i| {
            let manager = if i == 0 { String::new() } else { format!("E{}", i - 1) };
            Employee::new(format!("E{i}"), manager)
        })
        .collect();
    let last = format!("E{}", len - 1);

    let mut state = OrgChartState::with_records(records);
    assert!(state.report().is_clean());
    assert_eq!(org_chart::count_nodes(state.forest()), len);
    assert_eq!(state.descendant_count("E0"), len - 1);
    assert_eq!(ids(state.visible_nodes()), vec!["E0", "E1"]);

    assert!(state.reveal(&last));
    assert_eq!(state.visible_nodes().len(), len);
    assert_eq!(state.visible_descendant_count("E0"), len - 1);
    assert_eq!(state.node_path(&last).len(), len);

    let hits = state.search(&last);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path.len(), len);

    state.set_filter(FilterCriteria::new().with_max_level(50_000));
    assert_eq!(state.filter_counts(), (50_000, len));
    assert_eq!(org_chart::count_nodes(state.display_forest()), 50_000);
    state.clear_filter();

    let mut nav = Navigator::new();
    nav.select(last.clone());
    assert_eq!(
        nav.apply(&mut state, NavCommand::Parent),
        NavOutcome::Selected(format!("E{}", len - 2))
    );

    let snapshot = state.clone();
    state.switch_dataset(Vec::new());
    assert!(state.forest().is_empty());
    drop(snapshot);
}
