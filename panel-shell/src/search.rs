//! Incremental text filter over the role-visible menu.

use std::time::Duration;

use crate::menu::Menu;

/// Quiet period before typed input is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(180);
/// Text of the placeholder shown when nothing matches.
pub const NO_RESULTS_TEXT: &str = "Sonuç bulunamadı";

/// Lower-cased, trimmed form of a search term.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The single "no results" node. At most one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoResults {
    id: u64,
}

impl NoResults {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &'static str {
        NO_RESULTS_TEXT
    }
}

/// Result of one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    pub matches: usize,
    pub active: Option<usize>,
}

/// Search input buffer, applied term and placeholder lifecycle.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    input: String,
    term: String,
    placeholder: Option<NoResults>,
    placeholders_created: u64,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw text as last typed, not necessarily applied yet.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Normalized term of the last applied pass.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn placeholder(&self) -> Option<NoResults> {
        self.placeholder
    }

    /// Number of placeholder nodes ever created.
    pub fn placeholders_created(&self) -> u64 {
        self.placeholders_created
    }

    pub(crate) fn set_input(&mut self, raw: String) {
        self.input = raw;
    }

    /// Apply the buffered input.
    pub fn apply_pending(&mut self, menu: &mut Menu) -> FilterOutcome {
        let raw = self.input.clone();
        self.apply(menu, &raw)
    }

    /// Filter `menu` by `raw` and restore the active-item invariant.
    pub fn apply(&mut self, menu: &mut Menu, raw: &str) -> FilterOutcome {
        let term = normalize_term(raw);

        for index in 0..menu.len() {
            let matches = term.is_empty()
                || menu.item(index).is_some_and(|item| {
                    item.label().to_lowercase().contains(term.as_str())
                });
            menu.set_filter_visible(index, matches);
        }

        let matches = menu.visible_indices().len();
        if !term.is_empty() && matches == 0 {
            self.show_placeholder();
        } else {
            self.placeholder = None;
        }

        menu.repair_active();
        self.term = term;

        FilterOutcome {
            matches,
            active: menu.active(),
        }
    }

    /// Drop the term and show the role-only view again.
    pub fn clear(&mut self, menu: &mut Menu) -> FilterOutcome {
        self.input.clear();
        self.apply(menu, "")
    }

    fn show_placeholder(&mut self) {
        if self.placeholder.is_some() {
            return;
        }
        self.placeholders_created += 1;
        self.placeholder = Some(NoResults {
            id: self.placeholders_created,
        });
    }
}
