//! A headless element tree.
//!
//! [`Document`] is a minimal [`Host`] useful to drive drag sources without
//! a real toolkit, like in tests or in headless applications.
//!
//! Selectors are matched by [`scraper`] against an HTML rendition of the
//! tree, rebuilt lazily after every change. Tags must therefore be valid
//! HTML tag names, and void elements like `img` cannot have children.
use std::cell::OnceCell;

use rustc_hash::FxHashMap;
use scraper::Html;
use smol_str::SmolStr;

use crate::host::{Event, Host};
use crate::selector::Selector;

/// The attribute linking rendered elements back to their node.
const NODE_ATTRIBUTE: &str = "data-node";

/// The identifier of a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: SmolStr,
    id: Option<SmolStr>,
    classes: Vec<SmolStr>,
    attributes: FxHashMap<SmolStr, SmolStr>,
    parent: Option<NodeId>,
}

/// A tree of elements with tags, ids, classes and attributes.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    markup: OnceCell<Html>,
}

impl Document {
    /// Creates an empty [`Document`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new node without a parent.
    pub fn create_root(&mut self, tag: &str) -> NodeId {
        self.insert(tag, None)
    }

    /// Creates a new node as a child of `parent`.
    ///
    /// If `parent` does not belong to this [`Document`], the node is
    /// created as a root.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let parent = self.contains(parent).then_some(parent);

        self.insert(tag, parent)
    }

    fn insert(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());

        self.nodes.push(Node {
            tag: SmolStr::new(tag),
            id: None,
            classes: Vec::new(),
            attributes: FxHashMap::default(),
            parent,
        });
        self.markup = OnceCell::new();

        id
    }

    /// Returns the number of nodes in the [`Document`].
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the [`Document`] has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if the node belongs to this [`Document`].
    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    /// Sets the id of a node.
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(node) = self.nodes.get_mut(node.0) {
            node.id = Some(SmolStr::new(id));
            self.markup = OnceCell::new();
        }
    }

    /// Sets an attribute of a node.
    ///
    /// `id` and `class` are managed by [`Document::set_id`] and
    /// [`Document::add_class`] and are not rendered from attributes.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(node.0) {
            let _ = node
                .attributes
                .insert(SmolStr::new(name), SmolStr::new(value));
            self.markup = OnceCell::new();
        }
    }

    /// Adds a class to a node, unless it is already present.
    ///
    /// Empty class names are ignored.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if class.is_empty() {
            return;
        }

        if let Some(node) = self.nodes.get_mut(node.0) {
            if !node.classes.iter().any(|existing| existing == class) {
                node.classes.push(SmolStr::new(class));
                self.markup = OnceCell::new();
            }
        }
    }

    /// Removes a class from a node, if present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(node.0) {
            let count = node.classes.len();
            node.classes.retain(|existing| existing != class);

            if node.classes.len() != count {
                self.markup = OnceCell::new();
            }
        }
    }

    /// Returns the classes of a node, in insertion order.
    pub fn classes(&self, node: NodeId) -> &[SmolStr] {
        self.nodes
            .get(node.0)
            .map(|node| node.classes.as_slice())
            .unwrap_or_default()
    }

    /// Returns `true` if the node has the given class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|existing| existing == class)
    }

    /// Returns the parent of a node, if any.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|node| node.parent)
    }

    /// Returns `true` if the node matches the given [`Selector`].
    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.contains(node) && self.query(selector).any(|found| found == node)
    }

    /// Returns an iterator over all nodes matching the [`Selector`], in
    /// document order.
    pub fn query<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = NodeId> + 'a {
        self.markup()
            .select(selector.compiled())
            .filter_map(|element| element.value().attr(NODE_ATTRIBUTE))
            .filter_map(|index| index.parse().ok())
            .map(NodeId)
    }

    fn markup(&self) -> &Html {
        self.markup.get_or_init(|| Html::parse_fragment(&self.render()))
    }

    fn render(&self) -> String {
        let mut children = vec![Vec::new(); self.nodes.len()];
        let mut roots = Vec::new();

        for (index, node) in self.nodes.iter().enumerate() {
            match node.parent {
                Some(parent) => children[parent.0].push(index),
                None => roots.push(index),
            }
        }

        let mut markup = String::new();

        for root in roots {
            self.render_node(root, &children, &mut markup);
        }

        markup
    }

    fn render_node(&self, index: usize, children: &[Vec<usize>], markup: &mut String) {
        let node = &self.nodes[index];

        markup.push('<');
        markup.push_str(&node.tag);
        push_attribute(markup, NODE_ATTRIBUTE, &index.to_string());

        if let Some(id) = &node.id {
            push_attribute(markup, "id", id);
        }

        if !node.classes.is_empty() {
            push_attribute(markup, "class", &node.classes.join(" "));
        }

        for (name, value) in &node.attributes {
            if !matches!(name.as_str(), "id" | "class" | NODE_ATTRIBUTE) {
                push_attribute(markup, name, value);
            }
        }

        markup.push('>');

        for child in &children[index] {
            self.render_node(*child, children, markup);
        }

        markup.push_str("</");
        markup.push_str(&node.tag);
        markup.push('>');
    }
}

fn push_attribute(markup: &mut String, name: &str, value: &str) {
    markup.push(' ');
    markup.push_str(name);
    markup.push_str("=\"");

    for c in value.chars() {
        match c {
            '&' => markup.push_str("&amp;"),
            '"' => markup.push_str("&quot;"),
            '<' => markup.push_str("&lt;"),
            '>' => markup.push_str("&gt;"),
            _ => markup.push(c),
        }
    }

    markup.push('"');
}

impl Host for Document {
    type Element = NodeId;

    fn matches(&self, element: &NodeId, selector: &Selector) -> bool {
        Document::matches(self, *element, selector)
    }

    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        Document::parent(self, *element)
    }

    fn add_class(&mut self, element: &NodeId, class: &str) {
        log::trace!("add class {class:?} to {element:?}");
        Document::add_class(self, *element, class);
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) {
        log::trace!("remove class {class:?} from {element:?}");
        Document::remove_class(self, *element, class);
    }
}

/// A gesture event targeting a node of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureEvent {
    /// The node the gesture happened on.
    pub target: NodeId,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl GestureEvent {
    /// Creates a new [`GestureEvent`] targeting the given node.
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Returns `true` if a handler stopped the propagation of the event.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Returns `true` if a handler suppressed the default behavior.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl Event for GestureEvent {
    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_unique() {
        let mut document = Document::new();
        let node = document.create_root("div");

        document.add_class(node, "dragging");
        document.add_class(node, "dragging");
        document.add_class(node, "");

        assert_eq!(document.classes(node), &["dragging"]);
    }

    #[test]
    fn test_remove_missing_class_is_noop() {
        let mut document = Document::new();
        let node = document.create_root("div");
        document.add_class(node, "card");

        document.remove_class(node, "dragging");

        assert_eq!(document.classes(node), &["card"]);
    }

    #[test]
    fn test_foreign_node_is_ignored() {
        let mut document = Document::new();
        let mut other = Document::new();
        let _ = other.create_root("div");
        let foreign = other.append(NodeId(0), "span");

        document.add_class(foreign, "card");

        assert!(document.is_empty());
        assert!(!document.contains(foreign));
        assert!(document.classes(foreign).is_empty());
        assert_eq!(document.parent(foreign), None);
    }

    #[test]
    fn test_query() {
        let mut document = Document::new();
        let list = document.create_root("ul");
        let first = document.append(list, "li");
        let second = document.append(list, "li");
        document.add_class(second, "selected");
        let footer = document.create_root("div");
        let nested = document.append(first, "span");

        let items = Selector::parse("ul > li").expect("valid selector");
        let selected = Selector::parse(".selected").expect("valid selector");
        let any = Selector::parse("*").expect("valid selector");

        assert_eq!(document.query(&items).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(document.query(&selected).collect::<Vec<_>>(), vec![second]);
        assert_eq!(
            document.query(&any).collect::<Vec<_>>(),
            vec![list, first, nested, second, footer]
        );
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut document = Document::new();
        let node = document.create_root("div");
        document.set_attribute(node, "title", "say \"<hi>\" & go");
        document.set_attribute(node, "class", "ignored");

        let title = Selector::parse(r#"[title='say "<hi>" & go']"#).expect("valid selector");
        let class = Selector::parse(".ignored").expect("valid selector");

        assert!(document.matches(node, &title));
        assert!(!document.matches(node, &class));
    }

    #[test]
    fn test_append_to_foreign_parent_creates_root() {
        let mut document = Document::new();
        let node = document.append(NodeId(4), "div");

        assert_eq!(document.parent(node), None);
        assert!(document.matches(node, &Selector::parse("div").expect("valid selector")));
    }

    #[test]
    fn test_gesture_event_flags() {
        let mut document = Document::new();
        let node = document.create_root("div");
        let mut event = GestureEvent::new(node);

        assert!(!event.is_propagation_stopped());
        assert!(!event.is_default_prevented());

        event.stop_propagation();
        event.prevent_default();

        assert!(event.is_propagation_stopped());
        assert!(event.is_default_prevented());
    }
}
