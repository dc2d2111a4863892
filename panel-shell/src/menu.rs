//! Menu destinations, role gating and the active-item invariant.

use serde::{Deserialize, Serialize};

use crate::session::Role;

/// Required role of entries that declare none.
pub const EVERYONE: &str = "everyone";

const ADMIN_ONLY: &str = "admin";

/// A navigable destination as declared by the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(
        default,
        rename = "role",
        skip_serializing_if = "Option::is_none"
    )]
    pub required_role: Option<String>,
}

impl MenuEntry {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: Some(target.into()),
            required_role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.required_role = Some(role.into());
        self
    }
}

/// Runtime state of one menu entry.
#[derive(Debug, Clone)]
pub struct MenuItem {
    entry: MenuEntry,
    role_visible: bool,
    filter_visible: bool,
}

impl MenuItem {
    fn new(entry: MenuEntry) -> Self {
        Self {
            entry,
            role_visible: true,
            filter_visible: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.entry.label
    }

    pub fn target(&self) -> Option<&str> {
        self.entry
            .target
            .as_deref()
            .filter(|target| !target.is_empty())
    }

    pub fn required_role(&self) -> &str {
        self.entry.required_role.as_deref().unwrap_or(EVERYONE)
    }

    /// Visible after both the role gate and the search filter.
    pub fn is_visible(&self) -> bool {
        self.role_visible && self.filter_visible
    }

    pub fn is_role_visible(&self) -> bool {
        self.role_visible
    }
}

/// Ordered menu with at most one active item, which is always visible.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
    active: Option<usize>,
}

impl Menu {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self {
            items: entries.into_iter().map(MenuItem::new).collect(),
            active: None,
        }
    }

    /// Apply the admin gate and select the first visible item.
    pub fn apply_role(&mut self, role: &Role) {
        for item in &mut self.items {
            item.role_visible =
                item.required_role() != ADMIN_ONLY || role.is_admin();
        }
        self.active = self.first_visible();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(MenuItem::is_visible)
    }

    /// Indices of visible items in declaration order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_visible())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn first_visible(&self) -> Option<usize> {
        self.items.iter().position(MenuItem::is_visible)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&MenuItem> {
        self.active.and_then(|index| self.items.get(index))
    }

    /// Mark `index` active. Hidden or unknown items are refused.
    pub fn set_active(&mut self, index: usize) -> bool {
        if !self.is_visible(index) {
            return false;
        }
        self.active = Some(index);
        true
    }

    pub(crate) fn set_filter_visible(&mut self, index: usize, visible: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.filter_visible = visible;
        }
    }

    /// Restore the active invariant after visibility changed.
    ///
    /// A hidden active item is replaced by the first visible one; an empty
    /// selection picks the first visible item when one exists.
    pub(crate) fn repair_active(&mut self) {
        let still_visible =
            self.active.is_some_and(|index| self.is_visible(index));
        if !still_visible {
            self.active = self.first_visible();
        }
    }
}
