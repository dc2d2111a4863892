use super::document::{HostedDocument, NodeId, Selector};

/// Hosted navigation chrome hidden inside the frame.
pub const NAVIGATION_SELECTORS: [&str; 8] = [
    "#sidebar",
    ".sidebar",
    "aside",
    ".left",
    ".menu",
    ".menu-wrapper",
    ".side-nav",
    "#leftNav",
];

/// Hosted menu toggles hidden inside the frame.
pub const TOGGLE_SELECTORS: [&str; 4] =
    ["#toggleBtn", ".toggleBtn", ".menu-toggle", ".btn-toggle"];

/// Hosted content containers widened to fill the frame.
pub const MAIN_SELECTORS: [&str; 5] =
    [".main", "#mainContainer", "main", ".content", ".page"];

/// Class added to the hosted root element.
pub const EMBEDDED_ROOT_CLASS: &str = "embedded-iframe";

const DEFAULT_PADDING_LEFT: &str = "18px";

/// Number of distinct nodes touched by one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdjustReport {
    pub hidden: usize,
    pub relaxed: usize,
}

/// Strip the hosted page's own navigation and widen its content.
///
/// Running the pass again over its own output changes nothing.
pub fn adjust_document(doc: &mut dyn HostedDocument) -> AdjustReport {
    let hidden = select_all(
        doc,
        NAVIGATION_SELECTORS.iter().chain(TOGGLE_SELECTORS.iter()),
    );
    for &node in &hidden {
        doc.set_style(node, "display", "none");
    }

    let relaxed = select_all(doc, MAIN_SELECTORS.iter());
    for &node in &relaxed {
        doc.set_style(node, "margin-left", "0");
        let padding = doc
            .style(node, "padding-left")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_PADDING_LEFT.to_string());
        doc.set_style(node, "padding-left", &padding);
        doc.set_style(node, "max-width", "none");
    }

    doc.add_root_class(EMBEDDED_ROOT_CLASS);

    AdjustReport {
        hidden: hidden.len(),
        relaxed: relaxed.len(),
    }
}

fn select_all<'a>(
    doc: &dyn HostedDocument,
    selectors: impl Iterator<Item = &'a &'static str>,
) -> Vec<NodeId> {
    let mut nodes: Vec<NodeId> = selectors
        .flat_map(|raw| doc.select(&Selector::parse(raw)))
        .collect();
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}
