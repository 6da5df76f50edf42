//! Owned markup tree
//!
//! The html5ever `RcDom` is reference counted and interior-mutable. Every
//! conversion in this crate lowers it once into the plain owned tree defined
//! here, then works on that: text extraction reads it, the sanitizer builds a
//! fresh tree from it, and the serializer writes it out.
//!
//! Comments, doctypes and processing instructions carry no note content and
//! are dropped while lowering.

use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// A node of the markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character data
    Text(String),
    /// An element with its attributes and children
    Element(Element),
}

/// An element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name
    pub name: String,
    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
    /// Children in document order
    pub children: Vec<Node>,
}

/// A parsed document: the top-level nodes under the document root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level nodes in document order
    pub children: Vec<Node>,
}

impl Node {
    /// Shorthand for a text node
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl Element {
    /// Create an element without attributes
    pub fn new(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Look up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Find the first descendant element (or self) with the given tag name,
    /// in document order
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        find_in(&self.children, name)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Document {
    /// Find the first element with the given tag name, in document order
    pub fn find(&self, name: &str) -> Option<&Element> {
        find_in(&self.children, name)
    }

    /// Lower an html5ever DOM into an owned tree
    ///
    /// Elements nested deeper than `max_depth` are dropped together with their
    /// subtree so that later recursive passes stay within a bounded depth.
    pub fn from_rcdom(dom: &RcDom, max_depth: usize) -> Self {
        let mut lowering = Lowering {
            max_depth,
            truncated: 0,
        };
        let children = lowering.children(&dom.document, 0);
        if lowering.truncated > 0 {
            tracing::warn!(
                max_depth,
                dropped = lowering.truncated,
                "Markup nested deeper than the maximum depth; deeper subtrees dropped"
            );
        }
        Self { children }
    }
}

fn find_in<'a>(nodes: &'a [Node], name: &str) -> Option<&'a Element> {
    nodes
        .iter()
        .filter_map(Node::as_element)
        .find_map(|element| element.find(name))
}

struct Lowering {
    max_depth: usize,
    truncated: usize,
}

impl Lowering {
    fn children(&mut self, handle: &Handle, depth: usize) -> Vec<Node> {
        let mut nodes = Vec::new();
        for child in handle.children.borrow().iter() {
            if let Some(node) = self.node(child, depth) {
                // html5ever may split character data; keep adjacent text together
                if let (Node::Text(text), Some(Node::Text(last))) = (&node, nodes.last_mut()) {
                    last.push_str(text);
                    continue;
                }
                nodes.push(node);
            }
        }
        nodes
    }

    fn node(&mut self, handle: &Handle, depth: usize) -> Option<Node> {
        match handle.data {
            NodeData::Text { ref contents } => Some(Node::Text(contents.borrow().to_string())),
            NodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                if depth >= self.max_depth {
                    self.truncated += 1;
                    return None;
                }
                let attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                Some(Node::Element(Element {
                    name: name.local.to_string(),
                    attrs,
                    children: self.children(handle, depth + 1),
                }))
            }
            NodeData::Document
            | NodeData::Comment { .. }
            | NodeData::Doctype { .. }
            | NodeData::ProcessingInstruction { .. } => None,
        }
    }
}
