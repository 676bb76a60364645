//! Node structure of the document arena.

use crate::Attribute;

/// Index of a node inside a [`Document`] arena.
///
/// Nodes are stored in a flat array and reference each other by index, so
/// an id stays valid for as long as the document it came from.
///
/// [`Document`]: crate::Document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of this node in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node holds: an element with a tag name, or a run of character
/// data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element node and its tag name.
    Element {
        /// The tag name.
        name: String,
    },
    /// A text node; `raw` keeps the source form, entities unresolved.
    Text {
        /// The raw character data.
        raw: String,
    },
}

/// A node in the document tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) attributes: Vec<Attribute>,
}

impl Node {
    /// The node kind.
    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Tag name, for element nodes.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name } => Some(name),
            NodeKind::Text { .. } => None,
        }
    }

    /// Parent node, absent for top-level nodes.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in document order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attributes in document order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Whether this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }
}
