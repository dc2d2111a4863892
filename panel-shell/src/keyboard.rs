//! Arrow and enter traversal over the visible menu items.

use crate::menu::Menu;

/// Keys handled while the menu list has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    ArrowDown,
    ArrowUp,
    Enter,
}

/// Keys handled while the search input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Enter,
    Escape,
}

/// What a menu key press resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// `item` became active; `row` is its position among visible items.
    Moved { item: usize, row: usize },
    /// `item` should be selected and loaded.
    Activate { item: usize },
    /// Nothing is visible.
    Ignored,
}

/// Resolve `key` against the current visible set, updating the active item
/// for arrow keys.
pub fn navigate(menu: &mut Menu, key: MenuKey) -> KeyOutcome {
    let visible = menu.visible_indices();
    if visible.is_empty() {
        return KeyOutcome::Ignored;
    }

    let len = visible.len();
    let current = menu
        .active()
        .and_then(|active| visible.iter().position(|&index| index == active));

    let row = match key {
        MenuKey::ArrowDown => current.map_or(0, |row| (row + 1) % len),
        MenuKey::ArrowUp => match current {
            Some(0) | None => len - 1,
            Some(row) => row - 1,
        },
        MenuKey::Enter => {
            let row = current.unwrap_or(0);
            return KeyOutcome::Activate { item: visible[row] };
        },
    };

    let item = visible[row];
    menu.set_active(item);
    KeyOutcome::Moved { item, row }
}

/// Rows of a scrolled list currently in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollWindow {
    pub first: usize,
    pub rows: usize,
}

impl ScrollWindow {
    pub fn new(rows: usize) -> Self {
        Self { first: 0, rows }
    }

    /// Scroll the least amount needed to bring `row` into view.
    ///
    /// Returns the new first row. Rows already in view leave the window
    /// untouched.
    pub fn reveal(&mut self, row: usize) -> usize {
        let rows = self.rows.max(1);
        if row < self.first {
            self.first = row;
        } else if row >= self.first + rows {
            self.first = row + 1 - rows;
        }
        self.first
    }
}
