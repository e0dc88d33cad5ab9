//! Multi-level category menu.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::node::{CategoryId, MenuNodeState};
use crate::error::WidgetError;

/// Category as delivered by the backend or embedded config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: CategoryId,
    pub name: String,
    /// Link target, e.g. `/category/shoes/`.
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryEntry>,
}

impl CategoryEntry {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            href: href.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<CategoryEntry>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone)]
struct MenuNode {
    id: CategoryId,
    name: String,
    href: String,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: usize,
    state: MenuNodeState,
    /// Bumped on every state change so stale transition-end callbacks can be told apart.
    generation: u64,
}

/// Render row for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemView {
    pub id: CategoryId,
    pub name: String,
    pub href: String,
    pub depth: usize,
    pub has_children: bool,
    pub state: MenuNodeState,
    pub active: bool,
}

/// Expandable category tree. Nodes are stored flat in depth-first order.
#[derive(Debug, Clone, Default)]
pub struct CategoryMenu {
    nodes: Vec<MenuNode>,
    index: HashMap<CategoryId, usize>,
    active: Option<usize>,
}

impl CategoryMenu {
    /// Build the tree. Ids must be unique across all levels.
    pub fn new(entries: Vec<CategoryEntry>) -> Result<Self, WidgetError> {
        let mut menu = Self::default();
        for entry in entries {
            menu.insert(entry, None, 0)?;
        }
        tracing::debug!(nodes = menu.nodes.len(), "category menu built");
        Ok(menu)
    }

    fn insert(
        &mut self,
        entry: CategoryEntry,
        parent: Option<usize>,
        depth: usize,
    ) -> Result<(), WidgetError> {
        if self.index.contains_key(&entry.id) {
            return Err(WidgetError::DuplicateCategory(entry.id.to_string()));
        }
        let slot = self.nodes.len();
        self.index.insert(entry.id.clone(), slot);
        self.nodes.push(MenuNode {
            id: entry.id,
            name: entry.name,
            href: entry.href,
            parent,
            children: Vec::new(),
            depth,
            state: MenuNodeState::Collapsed,
            generation: 0,
        });
        if let Some(p) = parent {
            self.nodes[p].children.push(slot);
        }
        for child in entry.children {
            self.insert(child, Some(slot), depth + 1)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn slot(&self, id: &CategoryId) -> Result<usize, WidgetError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| WidgetError::UnknownCategory(id.to_string()))
    }

    pub fn state(&self, id: &CategoryId) -> Result<MenuNodeState, WidgetError> {
        Ok(self.nodes[self.slot(id)?].state)
    }

    pub fn aria_expanded(&self, id: &CategoryId) -> Result<bool, WidgetError> {
        Ok(self.state(id)?.aria_expanded())
    }

    pub fn has_children(&self, id: &CategoryId) -> Result<bool, WidgetError> {
        Ok(!self.nodes[self.slot(id)?].children.is_empty())
    }

    pub fn parent(&self, id: &CategoryId) -> Result<Option<&CategoryId>, WidgetError> {
        let slot = self.slot(id)?;
        Ok(self.nodes[slot].parent.map(|p| &self.nodes[p].id))
    }

    // === Transitions ===

    /// Toggle a submenu. Leaves have nothing to open and stay collapsed.
    pub fn toggle(&mut self, id: &CategoryId) -> Result<MenuNodeState, WidgetError> {
        self.transition(id, MenuNodeState::toggled)
    }

    /// Toggle a submenu and, if it starts opening, collapse its open siblings.
    pub fn toggle_exclusive(&mut self, id: &CategoryId) -> Result<MenuNodeState, WidgetError> {
        let state = self.toggle(id)?;
        if state.aria_expanded() {
            let slot = self.slot(id)?;
            let parent = self.nodes[slot].parent;
            let siblings: Vec<usize> = (0..self.nodes.len())
                .filter(|&other| other != slot && self.nodes[other].parent == parent)
                .collect();
            for sibling in siblings {
                self.set_state(sibling, MenuNodeState::collapsed);
            }
        }
        Ok(state)
    }

    pub fn expand(&mut self, id: &CategoryId) -> Result<MenuNodeState, WidgetError> {
        self.transition(id, MenuNodeState::expanded)
    }

    pub fn collapse(&mut self, id: &CategoryId) -> Result<MenuNodeState, WidgetError> {
        self.transition(id, MenuNodeState::collapsed)
    }

    /// The host saw `transitionend` on the node's submenu.
    pub fn transition_end(&mut self, id: &CategoryId) -> Result<MenuNodeState, WidgetError> {
        let slot = self.slot(id)?;
        self.set_state(slot, MenuNodeState::settled);
        Ok(self.nodes[slot].state)
    }

    /// Settle a transition started at `generation`. A node that has changed
    /// state since then is left alone.
    pub fn transition_end_at(
        &mut self,
        id: &CategoryId,
        generation: u64,
    ) -> Result<MenuNodeState, WidgetError> {
        let slot = self.slot(id)?;
        if self.nodes[slot].generation == generation {
            self.set_state(slot, MenuNodeState::settled);
        }
        Ok(self.nodes[slot].state)
    }

    pub fn generation(&self, id: &CategoryId) -> Result<u64, WidgetError> {
        Ok(self.nodes[self.slot(id)?].generation)
    }

    /// Nodes mid-animation with the generation that started it.
    pub fn transitioning(&self) -> Vec<(CategoryId, u64)> {
        self.nodes
            .iter()
            .filter(|node| node.state.is_transitioning())
            .map(|node| (node.id.clone(), node.generation))
            .collect()
    }

    fn set_state(&mut self, slot: usize, next: fn(MenuNodeState) -> MenuNodeState) {
        let node = &mut self.nodes[slot];
        let to = next(node.state);
        if to != node.state {
            node.state = to;
            node.generation += 1;
        }
    }

    fn transition(
        &mut self,
        id: &CategoryId,
        next: fn(MenuNodeState) -> MenuNodeState,
    ) -> Result<MenuNodeState, WidgetError> {
        let slot = self.slot(id)?;
        if self.nodes[slot].children.is_empty() {
            return Ok(self.nodes[slot].state);
        }
        let from = self.nodes[slot].state;
        self.set_state(slot, next);
        let node = &self.nodes[slot];
        if from != node.state {
            tracing::debug!(
                category = %node.id,
                from = from.as_str(),
                to = node.state.as_str(),
                "menu node transition"
            );
        }
        Ok(node.state)
    }

    /// Start collapsing every open node (outside click).
    pub fn collapse_all(&mut self) {
        for slot in 0..self.nodes.len() {
            self.set_state(slot, MenuNodeState::collapsed);
        }
    }

    // === Active path ===

    /// Mark the node whose link matches the current location path. Query
    /// strings, fragments and trailing slashes are ignored.
    pub fn highlight_path(&mut self, path: &str) -> Option<&CategoryId> {
        let wanted = normalize_path(path);
        self.active = self
            .nodes
            .iter()
            .position(|node| normalize_path(&node.href) == wanted);
        self.active.map(|slot| &self.nodes[slot].id)
    }

    pub fn active(&self) -> Option<&CategoryId> {
        self.active.map(|slot| &self.nodes[slot].id)
    }

    /// Open every ancestor of the active node immediately, without animating.
    pub fn auto_expand_active(&mut self) {
        let mut cursor = self.active.and_then(|slot| self.nodes[slot].parent);
        while let Some(slot) = cursor {
            self.set_state(slot, |_| MenuNodeState::Expanded);
            cursor = self.nodes[slot].parent;
        }
    }

    /// A node is visible when every ancestor is open or opening.
    pub fn is_visible(&self, id: &CategoryId) -> Result<bool, WidgetError> {
        let mut cursor = self.nodes[self.slot(id)?].parent;
        while let Some(slot) = cursor {
            if !self.nodes[slot].state.aria_expanded() {
                return Ok(false);
            }
            cursor = self.nodes[slot].parent;
        }
        Ok(true)
    }

    /// Visible rows in display order.
    pub fn visible_items(&self) -> Vec<MenuItemView> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| self.is_visible(&node.id).unwrap_or(false))
            .map(|(slot, node)| MenuItemView {
                id: node.id.clone(),
                name: node.name.clone(),
                href: node.href.clone(),
                depth: node.depth,
                has_children: !node.children.is_empty(),
                state: node.state,
                active: self.active == Some(slot),
            })
            .collect()
    }
}

fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CategoryId {
        CategoryId::from(s)
    }

    fn menu() -> CategoryMenu {
        CategoryMenu::new(vec![
            CategoryEntry::new("clothing", "Clothing", "/category/clothing/").with_children(vec![
                CategoryEntry::new("men", "Men", "/category/men/").with_children(vec![
                    CategoryEntry::new("shirts", "Shirts", "/category/shirts/"),
                ]),
                CategoryEntry::new("women", "Women", "/category/women/"),
            ]),
            CategoryEntry::new("books", "Books", "/category/books/"),
        ])
        .unwrap()
    }

    // === Construction Tests ===

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = CategoryMenu::new(vec![
            CategoryEntry::new("a", "A", "/a/"),
            CategoryEntry::new("b", "B", "/b/").with_children(vec![CategoryEntry::new("a", "A", "/a2/")]),
        ])
        .unwrap_err();
        assert!(matches!(err, WidgetError::DuplicateCategory(ref c) if c == "a"));
    }

    #[test]
    fn test_unknown_id() {
        let mut m = menu();
        assert!(matches!(m.toggle(&id("garden")), Err(WidgetError::UnknownCategory(_))));
    }

    // === Transition Tests ===

    #[test]
    fn test_toggle_runs_through_transition() {
        let mut m = menu();
        assert_eq!(m.toggle(&id("clothing")).unwrap(), MenuNodeState::Expanding);
        assert!(m.aria_expanded(&id("clothing")).unwrap());
        assert_eq!(m.transition_end(&id("clothing")).unwrap(), MenuNodeState::Expanded);
        assert_eq!(m.toggle(&id("clothing")).unwrap(), MenuNodeState::Collapsing);
        assert_eq!(m.transition_end(&id("clothing")).unwrap(), MenuNodeState::Collapsed);
    }

    #[test]
    fn test_toggle_mid_transition_reverses() {
        let mut m = menu();
        m.toggle(&id("clothing")).unwrap();
        assert_eq!(m.toggle(&id("clothing")).unwrap(), MenuNodeState::Collapsing);
    }

    #[test]
    fn test_leaf_toggle_is_noop() {
        let mut m = menu();
        assert_eq!(m.toggle(&id("books")).unwrap(), MenuNodeState::Collapsed);
        assert!(!m.has_children(&id("books")).unwrap());
    }

    #[test]
    fn test_collapse_all() {
        let mut m = menu();
        m.expand(&id("clothing")).unwrap();
        m.transition_end(&id("clothing")).unwrap();
        m.expand(&id("men")).unwrap();
        m.collapse_all();
        assert_eq!(m.state(&id("clothing")).unwrap(), MenuNodeState::Collapsing);
        assert_eq!(m.state(&id("men")).unwrap(), MenuNodeState::Collapsing);
    }

    #[test]
    fn test_opening_one_submenu_collapses_siblings() {
        let mut m = CategoryMenu::new(vec![
            CategoryEntry::new("clothing", "Clothing", "/c/clothing/")
                .with_children(vec![CategoryEntry::new("men", "Men", "/c/men/")]),
            CategoryEntry::new("toys", "Toys", "/c/toys/")
                .with_children(vec![CategoryEntry::new("lego", "Lego", "/c/lego/")]),
        ])
        .unwrap();
        m.toggle_exclusive(&id("clothing")).unwrap();
        m.transition_end(&id("clothing")).unwrap();

        assert_eq!(m.toggle_exclusive(&id("toys")).unwrap(), MenuNodeState::Expanding);
        assert_eq!(m.state(&id("clothing")).unwrap(), MenuNodeState::Collapsing);

        let mut moving: Vec<CategoryId> = m.transitioning().into_iter().map(|(c, _)| c).collect();
        moving.sort();
        assert_eq!(moving, vec![id("clothing"), id("toys")]);

        // Closing leaves the siblings alone.
        m.transition_end(&id("toys")).unwrap();
        m.transition_end(&id("clothing")).unwrap();
        assert_eq!(m.toggle_exclusive(&id("toys")).unwrap(), MenuNodeState::Collapsing);
        assert_eq!(m.state(&id("clothing")).unwrap(), MenuNodeState::Collapsed);
    }

    #[test]
    fn test_stale_transition_end_is_ignored() {
        let mut m = menu();
        m.toggle(&id("clothing")).unwrap();
        let opened = m.generation(&id("clothing")).unwrap();

        // Reversed before the opening animation finished.
        m.toggle(&id("clothing")).unwrap();
        let closed = m.generation(&id("clothing")).unwrap();
        assert_eq!(
            m.transition_end_at(&id("clothing"), opened).unwrap(),
            MenuNodeState::Collapsing
        );
        assert_eq!(
            m.transition_end_at(&id("clothing"), closed).unwrap(),
            MenuNodeState::Collapsed
        );
    }

    // === Visibility Tests ===

    #[test]
    fn test_visibility_follows_ancestors() {
        let mut m = menu();
        assert!(m.is_visible(&id("clothing")).unwrap());
        assert!(!m.is_visible(&id("men")).unwrap());

        m.toggle(&id("clothing")).unwrap();
        assert!(m.is_visible(&id("men")).unwrap());
        assert!(!m.is_visible(&id("shirts")).unwrap());

        let names: Vec<String> = m.visible_items().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Clothing", "Men", "Women", "Books"]);
    }

    // === Active Path Tests ===

    #[test]
    fn test_highlight_and_auto_expand() {
        let mut m = menu();
        assert_eq!(m.highlight_path("/category/shirts?page=2"), Some(&id("shirts")));
        m.auto_expand_active();

        assert_eq!(m.state(&id("clothing")).unwrap(), MenuNodeState::Expanded);
        assert_eq!(m.state(&id("men")).unwrap(), MenuNodeState::Expanded);
        assert_eq!(m.state(&id("shirts")).unwrap(), MenuNodeState::Collapsed);
        assert!(m.is_visible(&id("shirts")).unwrap());

        let active: Vec<CategoryId> = m
            .visible_items()
            .into_iter()
            .filter(|i| i.active)
            .map(|i| i.id)
            .collect();
        assert_eq!(active, vec![id("shirts")]);
    }

    #[test]
    fn test_highlight_without_match_clears() {
        let mut m = menu();
        m.highlight_path("/category/books/");
        assert_eq!(m.highlight_path("/cart/"), None);
        assert_eq!(m.active(), None);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/a/b/"), "/a/b");
        assert_eq!(normalize_path("/a/b#top"), "/a/b");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_entries_from_json() {
        let entries: Vec<CategoryEntry> = serde_json::from_str(
            r#"[{"id": "toys", "name": "Toys", "href": "/c/toys/",
                 "children": [{"id": "lego", "name": "Lego", "href": "/c/lego/"}]}]"#,
        )
        .unwrap();
        let m = CategoryMenu::new(entries).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.parent(&id("lego")).unwrap(), Some(&id("toys")));
    }
}
