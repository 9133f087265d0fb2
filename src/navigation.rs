//! Keyboard / selection navigation over the displayed forest.
//!
//! Relationship lookups are re-derived from the forest on every call; no
//! index is cached, so they stay correct across rebuilds, focus changes
//! and filtering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tree::{pre_order, Node};
use crate::view::{find_node, OrgChartState};

// =============================================================================
// RELATIONSHIPS
// =============================================================================

/// A node's sibling list and its position in it.
#[derive(Debug, Clone, Copy)]
pub struct Siblings<'a> {
    /// The root list, or the parent's children
    pub siblings: &'a [Node],
    /// Position of the node in `siblings`
    pub index: usize,
    /// `None` for roots
    pub parent: Option<&'a Node>,
}

/// Siblings of `id`: the root list for a root, otherwise the children of
/// the first node (pre-order) that lists `id` as a child.
pub fn siblings_and_index<'a>(forest: &'a [Node], id: &str) -> Option<Siblings<'a>> {
    if let Some(index) = forest.iter().position(|node| node.id == id) {
        return Some(Siblings {
            siblings: forest,
            index,
            parent: None,
        });
    }
    find_parent(forest, id).map(|(parent, index)| Siblings {
        siblings: &parent.children,
        index,
        parent: Some(parent),
    })
}

/// Parent of `id` within `forest`; `None` for roots and unknown ids.
pub fn parent_of<'a>(forest: &'a [Node], id: &str) -> Option<&'a Node> {
    find_parent(forest, id).map(|(parent, _)| parent)
}

fn find_parent<'a>(forest: &'a [Node], id: &str) -> Option<(&'a Node, usize)> {
    pre_order(forest).find_map(|node| {
        node.children
            .iter()
            .position(|child| child.id == id)
            .map(|index| (node, index))
    })
}

// =============================================================================
// COMMANDS & BINDINGS
// =============================================================================

/// Navigation verbs understood by [`Navigator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavCommand {
    PrevSibling,
    NextSibling,
    Parent,
    /// Select the first child, expanding the selection if collapsed
    FirstChild,
    ToggleExpand,
    Focus,
    /// Clear the selection, or exit focus when nothing is selected
    Escape,
}

/// Key name to command bindings.
///
/// A configured `bindings` table replaces the defaults wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub bindings: BTreeMap<String, NavCommand>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let bindings = [
            ("ArrowLeft", NavCommand::PrevSibling),
            ("ArrowRight", NavCommand::NextSibling),
            ("ArrowUp", NavCommand::Parent),
            ("ArrowDown", NavCommand::FirstChild),
            ("Enter", NavCommand::ToggleExpand),
            ("Space", NavCommand::ToggleExpand),
            ("f", NavCommand::Focus),
            ("Escape", NavCommand::Escape),
        ]
        .into_iter()
        .map(|(key, command)| (key.to_string(), command))
        .collect();

        Self { bindings }
    }
}

impl NavigationConfig {
    pub fn command_for(&self, key: &str) -> Option<NavCommand> {
        self.bindings.get(key).copied()
    }
}

// =============================================================================
// NAVIGATOR
// =============================================================================

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavOutcome {
    Selected(String),
    Toggled { id: String, expanded: bool },
    Focused(String),
    SelectionCleared,
    FocusCleared,
    Unchanged,
}

/// Selection cursor driven by [`NavCommand`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    selected: Option<String>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Resolve `key` through the state's bindings and apply it.
    pub fn handle_key(&mut self, state: &mut OrgChartState, key: &str) -> NavOutcome {
        match state.config().navigation.command_for(key) {
            Some(command) => self.apply(state, command),
            None => NavOutcome::Unchanged,
        }
    }

    /// Apply one command against the state's display forest.
    ///
    /// Movement with no (or a stale) selection selects the first root.
    /// Sibling moves stop at either end.
    pub fn apply(&mut self, state: &mut OrgChartState, command: NavCommand) -> NavOutcome {
        match command {
            NavCommand::Escape => self.escape(state),
            NavCommand::ToggleExpand => match self.current(state) {
                Some(id) => {
                    state.toggle(&id);
                    NavOutcome::Toggled {
                        expanded: state.is_expanded(&id),
                        id,
                    }
                }
                None => NavOutcome::Unchanged,
            },
            NavCommand::Focus => match self.current(state) {
                Some(id) if state.focus(&id) => NavOutcome::Focused(id),
                _ => NavOutcome::Unchanged,
            },
            NavCommand::PrevSibling
            | NavCommand::NextSibling
            | NavCommand::Parent
            | NavCommand::FirstChild => self.step(state, command),
        }
    }

    /// Selected id, if it is present in the display forest.
    fn current(&self, state: &OrgChartState) -> Option<String> {
        let id = self.selected.as_deref()?;
        find_node(state.display_forest(), id).map(|node| node.id.clone())
    }

    fn step(&mut self, state: &mut OrgChartState, command: NavCommand) -> NavOutcome {
        let (target, expand_first) = {
            let forest = state.display_forest();
            let current = self.selected.as_deref().and_then(|id| find_node(forest, id));
            let Some(current) = current else {
                return match forest.first() {
                    Some(first) => self.move_to(first.id.clone()),
                    None => NavOutcome::Unchanged,
                };
            };

            match command {
                NavCommand::PrevSibling | NavCommand::NextSibling => {
                    let Some(ctx) = siblings_and_index(forest, &current.id) else {
                        return NavOutcome::Unchanged;
                    };
                    let index = if command == NavCommand::PrevSibling {
                        ctx.index.checked_sub(1)
                    } else {
                        Some(ctx.index + 1).filter(|&i| i < ctx.siblings.len())
                    };
                    match index {
                        Some(i) => (ctx.siblings[i].id.clone(), None),
                        None => return NavOutcome::Unchanged,
                    }
                }
                NavCommand::Parent => match parent_of(forest, &current.id) {
                    Some(parent) => (parent.id.clone(), None),
                    None => return NavOutcome::Unchanged,
                },
                NavCommand::FirstChild => match current.children.first() {
                    Some(child) => {
                        let collapsed = !state.is_expanded(&current.id);
                        (child.id.clone(), collapsed.then(|| current.id.clone()))
                    }
                    None => return NavOutcome::Unchanged,
                },
                _ => return NavOutcome::Unchanged,
            }
        };

        if let Some(id) = expand_first {
            state.expand(&id);
        }
        self.move_to(target)
    }

    fn escape(&mut self, state: &mut OrgChartState) -> NavOutcome {
        if self.selected.take().is_some() {
            return NavOutcome::SelectionCleared;
        }
        if state.focused_id().is_some() {
            state.clear_focus();
            return NavOutcome::FocusCleared;
        }
        NavOutcome::Unchanged
    }

    fn move_to(&mut self, id: String) -> NavOutcome {
        self.selected = Some(id.clone());
        NavOutcome::Selected(id)
    }
}
