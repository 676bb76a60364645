//! Parsed XML document.

use std::borrow::Cow;

use crate::attribute::decode_entities;
use crate::{Attribute, Node, NodeId, NodeKind, Result};

/// An immutable parsed XML document.
///
/// The document owns every node of the tree; all accessors are read-only
/// lookups by [`NodeId`]. Once parsed, a document never changes.
#[derive(Debug)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) roots: Vec<NodeId>,
}

impl Document {
    /// Parse an XML buffer into a document.
    ///
    /// The buffer must be UTF-8; parsing itself is best-effort, see
    /// [`parse_str`](Document::parse_str).
    pub fn parse(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)?;
        Self::parse_str(text)
    }

    /// Parse XML text into a document.
    ///
    /// Mismatched or missing end tags are tolerated, elements still open at
    /// end of input keep the content seen so far, and whitespace-only text
    /// between elements is stripped. A buffer with no root element at all
    /// is an error.
    pub fn parse_str(xml: &str) -> Result<Self> {
        crate::parser::parse_document(xml)
    }

    /// The root element.
    ///
    /// A recovered document can carry more than one top-level element;
    /// this is the first of them. See [`roots`](Document::roots).
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    /// All top-level elements in document order.
    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Ordered children of a node. Empty for text nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    /// Attributes of a node in document order.
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        self.node(id).map(Node::attributes).unwrap_or(&[])
    }

    /// Tag name of an element node. `None` for text nodes.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(Node::name)
    }

    /// Parent of a node, absent for top-level nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// First child of a node.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Decoded text content of a text node, entities resolved.
    ///
    /// Returns `None` for element nodes.
    pub fn text_of(&self, id: NodeId) -> Option<Cow<'_, str>> {
        match self.node(id)?.kind() {
            NodeKind::Text { raw } => Some(decode_entities(raw)),
            NodeKind::Element { .. } => None,
        }
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
