use std::collections::{BTreeMap, BTreeSet};

/// Simple selector understood by the adjustment rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    /// Parse `#id`, `.class` or a bare tag name.
    pub fn parse(raw: &str) -> Self {
        if let Some(id) = raw.strip_prefix('#') {
            Selector::Id(id.to_string())
        } else if let Some(class) = raw.strip_prefix('.') {
            Selector::Class(class.to_string())
        } else {
            Selector::Tag(raw.to_ascii_lowercase())
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => element.has_class(class),
            Selector::Tag(tag) => element.tag == *tag,
        }
    }
}

/// Handle of an element inside a hosted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// Style-level access to a page hosted in the content frame.
pub trait HostedDocument {
    /// Elements matching `selector`, in document order.
    fn select(&self, selector: &Selector) -> Vec<NodeId>;
    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
    fn add_root_class(&mut self, class: &str);
    fn has_root_class(&self, class: &str) -> bool;
}

/// One element of an [`InMemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            style: BTreeMap::new(),
            text: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.style.insert(property.to_string(), value.to_string());
        self
    }

    /// Text owned directly by the element.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.style("display") == Some("none")
    }
}

/// Element tree standing in for a hosted page.
///
/// Elements are stored in document order; a parent always precedes its
/// children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryDocument {
    elements: Vec<Element>,
    parents: Vec<Option<NodeId>>,
    root_classes: BTreeSet<String>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level element.
    pub fn push(&mut self, element: Element) -> NodeId {
        self.elements.push(element);
        self.parents.push(None);
        NodeId(self.elements.len() - 1)
    }

    /// Append `element` under `parent`. An unknown parent makes it top-level.
    pub fn push_child(&mut self, parent: NodeId, element: Element) -> NodeId {
        let parent = (parent.0 < self.elements.len()).then_some(parent);
        self.elements.push(element);
        self.parents.push(parent);
        NodeId(self.elements.len() - 1)
    }

    pub fn with(mut self, element: Element) -> Self {
        self.push(element);
        self
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node.0).copied().flatten()
    }

    /// Whether `node` or any of its ancestors is hidden.
    pub fn is_hidden(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(node) = current {
            match self.element(node) {
                Some(element) if element.is_hidden() => return true,
                Some(_) => current = self.parent(node),
                None => return false,
            }
        }
        false
    }

    /// Elements left on screen, in document order.
    pub fn visible_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.is_hidden(NodeId(*index)))
            .map(|(_, element)| element)
    }

    pub fn root_classes(&self) -> impl Iterator<Item = &str> {
        self.root_classes.iter().map(String::as_str)
    }
}

impl HostedDocument for InMemoryDocument {
    fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| selector.matches(element))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.element(node)
            .and_then(|element| element.style(property))
            .map(str::to_string)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.style.insert(property.to_string(), value.to_string());
        }
    }

    fn add_root_class(&mut self, class: &str) {
        self.root_classes.insert(class.to_string());
    }

    fn has_root_class(&self, class: &str) -> bool {
        self.root_classes.contains(class)
    }
}

#[cfg(test)]
mod tests {
    use super::{Element, HostedDocument, InMemoryDocument, NodeId, Selector};

    #[test]
    fn given_selector_prefixes_when_parsed_then_kind_follows_prefix() {
        assert_eq!(Selector::parse("#leftNav"), Selector::Id("leftNav".into()));
        assert_eq!(Selector::parse(".menu"), Selector::Class("menu".into()));
        assert_eq!(Selector::parse("ASIDE"), Selector::Tag("aside".into()));
    }

    #[test]
    fn given_document_when_selected_then_matches_are_in_document_order() {
        let doc = InMemoryDocument::new()
            .with(Element::new("div").with_class("menu"))
            .with(Element::new("aside"))
            .with(
                Element::new("nav").with_class("side-nav").with_class("menu"),
            );

        assert_eq!(
            doc.select(&Selector::parse(".menu")),
            vec![NodeId(0), NodeId(2)]
        );
        assert_eq!(doc.select(&Selector::parse("aside")), vec![NodeId(1)]);
        assert!(doc.select(&Selector::parse("#missing")).is_empty());
    }

    #[test]
    fn given_element_when_style_set_then_value_is_readable() {
        let mut doc = InMemoryDocument::new();
        let node = doc.push(Element::new("main"));

        doc.set_style(node, "max-width", "none");
        doc.set_style(NodeId(9), "display", "none");

        assert_eq!(doc.style(node, "max-width").as_deref(), Some("none"));
        assert_eq!(doc.style(NodeId(9), "display"), None);
    }

    #[test]
    fn given_hidden_container_when_queried_then_descendants_are_hidden_too() {
        let mut doc = InMemoryDocument::new();
        let aside = doc.push(Element::new("aside").with_id("sidebar"));
        let list = doc.push_child(aside, Element::new("ul"));
        let item =
            doc.push_child(list, Element::new("li").with_text("Ayarlar"));
        let main = doc.push(Element::new("div").with_class("main"));
        doc.push_child(main, Element::new("p").with_text("Fiyatlar"));

        doc.set_style(aside, "display", "none");

        assert_eq!(doc.parent(item), Some(list));
        assert!(doc.is_hidden(item));
        assert!(!doc.is_hidden(main));
        let texts: Vec<&str> =
            doc.visible_elements().filter_map(Element::text).collect();
        assert_eq!(texts, vec!["Fiyatlar"]);
    }
}
