//! Arena tree and DOM-style operations.

use crate::DomError;

/// Handle to a node stored in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An element: tag name plus attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes as `(name, value)` pairs. Valueless attributes hold `""`.
    pub attrs: Vec<(String, String)>,
}

impl Element {
    /// Create an element without attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(key, _)| key == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_owned(), value));
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(key, _)| key == name)?;
        Some(self.attrs.remove(pos).1)
    }

    /// Iterate over the tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    /// Check whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root. Holds top-level fragment nodes.
    Document,
    /// An element.
    Element(Element),
    /// A text run.
    Text(String),
    /// A comment.
    Comment(String),
    /// A `<!DOCTYPE ...>` declaration, holding the text after the keyword.
    Doctype(String),
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// HTML document stored as an arena of nodes.
///
/// Nodes are never freed: detaching a node removes it from its parent but
/// keeps it addressable, so it can be re-inserted elsewhere (DOM move
/// semantics). Lookups such as [`element_by_id`](Self::element_by_id) only
/// see nodes attached under [`root`](Self::root).
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
            focused: None,
        }
    }

    /// The document root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(Element::new(tag.to_ascii_lowercase())))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Comment(text.into()))
    }

    /// Create a detached doctype node.
    pub fn create_doctype(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeData::Doctype(name.into()))
    }

    /// Node payload.
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Element payload, if `id` is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Tag name, if `id` is an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    // ---------------------------------------------------------------------
    // Tree structure
    // ---------------------------------------------------------------------

    /// Parent node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// All child nodes, including text and comments.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Child elements only.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
            .collect()
    }

    /// The next sibling that is an element.
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|&s| self.element(s).is_some())
    }

    /// Check whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Closest inclusive ancestor element matching `pred`.
    pub fn closest(&self, id: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.element(node).is_some_and(&pred) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Closest inclusive ancestor element carrying `class`.
    pub fn closest_with_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.closest(id, |el| el.has_class(class))
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.contains(child, parent) {
            return Err(DomError::Hierarchy { parent, child });
        }
        Ok(())
    }

    /// Remove a node from its parent. The node stays usable.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Remove a node from the tree, dropping focus if it was inside it.
    pub fn remove(&mut self, id: NodeId) {
        if self.focused.is_some_and(|f| self.contains(id, f)) {
            self.focused = None;
        }
        self.detach(id);
    }

    /// Append `child` as the last child of `parent`, moving it if attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Insert `child` as the first child of `parent`, moving it if attached.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.nodes[parent.0].children.insert(0, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Replace all children of `parent` with `children`.
    pub fn replace_children(
        &mut self,
        parent: NodeId,
        children: &[NodeId],
    ) -> Result<(), DomError> {
        for &child in children {
            self.check_insert(parent, child)?;
        }
        for old in self.nodes[parent.0].children.clone() {
            self.remove(old);
        }
        for &child in children {
            self.append_child(parent, child)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Attributes and class list
    // ---------------------------------------------------------------------

    /// Attribute value. `None` for missing attributes and non-elements.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Check attribute presence.
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Set an attribute. Ignored for non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id)?.remove_attr(name)
    }

    /// All attributes of an element, in order. Empty for non-elements.
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        self.element(id)
            .map(|el| el.attrs.as_slice())
            .unwrap_or_default()
    }

    /// Read a `data-*` attribute by its camel-cased dataset key.
    ///
    /// `tabLabel` reads `data-tab-label`, as `HTMLElement.dataset` does.
    pub fn dataset(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attr(id, &dataset_attr_name(key))
    }

    /// Class list tokens.
    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.element(id)
            .map(|el| el.classes().collect())
            .unwrap_or_default()
    }

    /// Check whether an element carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    /// Add a class token unless already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        if el.has_class(class) {
            return;
        }
        let value = match el.attr("class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_owned(),
        };
        el.set_attr("class", value);
    }

    // ---------------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------------

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(_) | NodeData::Doctype(_) => {}
            NodeData::Document | NodeData::Element(_) => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Replace all children with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) {
        for old in self.nodes[id.0].children.clone() {
            self.remove(old);
        }
        let text = text.into();
        if text.is_empty() {
            return;
        }
        let node = self.create_text(text);
        self.nodes[node.0].parent = Some(id);
        self.nodes[id.0].children.push(node);
    }

    /// Append text to the last child if it is a text node, else add one.
    pub(crate) fn append_text(&mut self, parent: NodeId, text: &str) {
        let last = self.nodes[parent.0].children.last().copied();
        if let Some(last) = last
            && let NodeData::Text(existing) = &mut self.nodes[last.0].data
        {
            existing.push_str(text);
            return;
        }
        let node = self.create_text(text);
        self.nodes[node.0].parent = Some(parent);
        self.nodes[parent.0].children.push(node);
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// First descendant element of `id` matching `pred`.
    pub fn find_first(&self, id: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .find(|&node| self.element(node).is_some_and(&pred))
    }

    /// All descendant elements of `id` matching `pred`, in document order.
    pub fn find_all(&self, id: NodeId, pred: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&node| self.element(node).is_some_and(&pred))
            .collect()
    }

    /// First attached element with the given `id` attribute.
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.find_first(self.root, |el| el.attr("id") == Some(element_id))
    }

    // ---------------------------------------------------------------------
    // Focus
    // ---------------------------------------------------------------------

    /// Move keyboard focus to `id`.
    pub fn focus(&mut self, id: NodeId) {
        self.focused = Some(id);
    }

    /// Currently focused node.
    pub fn active_element(&self) -> Option<NodeId> {
        self.focused
    }
}

/// Convert a camel-cased dataset key to its `data-*` attribute name.
fn dataset_attr_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 8);
    name.push_str("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}
