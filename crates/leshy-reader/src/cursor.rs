//! Cursor state and the element/attribute traversal engine.
//!
//! The cursor is the one piece of mutable state in a reader: the node the
//! walk is currently on, one level of parent, the open-element depth, a
//! recoverable error flag, and the decoded values cached for the current
//! element text and the selected attribute.

use leshy_dom::{Document, NodeId};
use tracing::warn;

use crate::ErrorKind;

/// Traversal position inside a [`Document`] plus cached derived values.
///
/// One parent level is enough: [`leave_element`](Cursor::leave_element)
/// only ever unwinds a single [`enter_element`](Cursor::enter_element),
/// and the grandparent is recomputed from the tree on the way out.
#[derive(Debug, Default)]
pub(crate) struct Cursor {
    /// Node the cursor is on; absent before the first enter and while a
    /// failed enter is waiting to be closed.
    node: Option<NodeId>,
    /// Node to restore on the next leave.
    parent: Option<NodeId>,
    /// Count of unmatched successful enters.
    depth: u32,
    /// Set while the last enter failed and no leave has closed it yet.
    error: Option<ErrorKind>,
    /// Decoded text of the current element's leading text child.
    element_value: Option<String>,
    /// Selected attribute, as a position in the current element's list.
    attribute: Option<usize>,
    /// Decoded value of the last selected attribute; survives failed
    /// selections and failed enters.
    attribute_value: Option<String>,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }

    pub(crate) fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    pub(crate) fn in_error(&self) -> bool {
        self.error.is_some()
    }

    /// Move onto the first child of the current node that is an element
    /// named `name`.
    ///
    /// The very first enter matches against the document's top-level
    /// elements instead of anyone's children, so it must name the root.
    /// On a miss the cursor drops into the error state and stays there
    /// until [`leave_element`](Cursor::leave_element) closes the failed
    /// attempt; the depth is only bumped on a hit.
    pub(crate) fn enter_element(&mut self, doc: &Document, name: &str) -> bool {
        if self.in_error() {
            return false;
        }

        let candidates: &[NodeId] = match self.node {
            Some(node) => doc.children(node),
            None => doc.roots(),
        };

        let found = candidates
            .iter()
            .copied()
            .find(|&id| doc.name(id) == Some(name));

        match found {
            Some(id) => {
                self.parent = self.node;
                self.node = Some(id);
                self.depth += 1;

                // Preload the leading text, if any.
                self.element_value = doc
                    .first_child(id)
                    .and_then(|child| doc.text_of(child))
                    .map(|text| text.into_owned());

                self.attribute = None;
                self.attribute_value = None;

                true
            }
            None => {
                self.error = Some(ErrorKind::UnknownNode);
                self.parent = self.node.or_else(|| doc.root());
                self.node = None;
                // The selection dies with the failed enter; the decoded
                // value stays readable through attribute_value().
                self.attribute = None;

                false
            }
        }
    }

    /// Close the current element, or a failed enter.
    ///
    /// Closing a failed enter clears the error state and restores the
    /// position held before the failed call without touching the depth,
    /// making recovery symmetric with a normal enter/leave pair. A full
    /// unwind rests the cursor on the document root at depth zero.
    pub(crate) fn leave_element(&mut self, doc: &Document) {
        if self.in_error() {
            self.error = None;
            self.node = self.parent;
            match self.node {
                Some(node) => self.parent = doc.parent(node),
                None => {
                    self.node = doc.root();
                    self.parent = None;
                }
            }
            return;
        }

        if self.node.is_none() {
            warn!("leave_element called with no cursor positioned");
            return;
        }

        self.element_value = None;
        self.attribute_value = None;

        self.depth = self.depth.saturating_sub(1);

        self.node = self.parent;
        self.parent = self.parent.and_then(|parent| doc.parent(parent));

        if self.node.is_none() {
            self.node = doc.root();
        }

        self.attribute = None;
    }

    /// Name of the current element; absent while unpositioned or in error.
    pub(crate) fn element_name<'d>(&self, doc: &'d Document) -> Option<&'d str> {
        if self.in_error() {
            return None;
        }
        self.node.and_then(|id| doc.name(id))
    }

    /// Cached text of the current element; absent in error state and for
    /// elements with no leading text child.
    pub(crate) fn element_value(&self) -> Option<&str> {
        if self.in_error() {
            return None;
        }
        self.element_value.as_deref()
    }

    /// Whether the current element carries attributes.
    pub(crate) fn has_attributes(&self, doc: &Document) -> bool {
        if self.in_error() {
            return false;
        }
        let Some(node) = self.node else {
            warn!("has_attributes called with no cursor positioned");
            return false;
        };
        !doc.attributes(node).is_empty()
    }

    /// Number of attributes on the current element; absent while
    /// unpositioned or in error.
    pub(crate) fn attribute_count(&self, doc: &Document) -> Option<usize> {
        if self.in_error() {
            return None;
        }
        self.node.map(|id| doc.attributes(id).len())
    }

    /// Select the attribute at `index` and eagerly decode its value.
    ///
    /// A failed selection (index out of range, no attributes) leaves the
    /// previously decoded value in place.
    pub(crate) fn select_attribute_at(&mut self, doc: &Document, index: usize) -> bool {
        if self.in_error() {
            return false;
        }
        let Some(node) = self.node else {
            return false;
        };

        match doc.attributes(node).get(index) {
            Some(attr) => {
                self.attribute = Some(index);
                self.attribute_value = Some(attr.decoded_value().into_owned());
                true
            }
            None => false,
        }
    }

    /// Select the first attribute named `name` and eagerly decode its
    /// value.
    ///
    /// A miss leaves the whole selection untouched, cached value included.
    pub(crate) fn select_attribute(&mut self, doc: &Document, name: &str) -> bool {
        let Some(node) = self.node else {
            return false;
        };

        let attrs = doc.attributes(node);
        match attrs.iter().position(|attr| attr.name() == name) {
            Some(index) => {
                self.attribute = Some(index);
                self.attribute_value = Some(attrs[index].decoded_value().into_owned());
                true
            }
            None => false,
        }
    }

    /// Name of the selected attribute, if a selection is active.
    pub(crate) fn selected_attribute_name<'d>(&self, doc: &'d Document) -> Option<&'d str> {
        if self.in_error() {
            return None;
        }
        let node = self.node?;
        let index = self.attribute?;
        doc.attributes(node).get(index).map(|attr| attr.name())
    }

    /// Decoded value of the last selected attribute.
    ///
    /// Unlike every other read, this checks neither the error state nor
    /// the cursor position: it returns whatever was cached last, stale or
    /// not. Callers relying on a fresh value must check the return of the
    /// preceding selection.
    pub(crate) fn attribute_value(&self) -> Option<&str> {
        self.attribute_value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Document {
        Document::parse_str("<book><author>Jane</author><title>Go</title></book>").unwrap()
    }

    #[test]
    fn test_first_enter_must_name_the_root() {
        let doc = book();
        let mut cursor = Cursor::new();

        assert!(cursor.enter_element(&doc, "book"));
        assert_eq!(cursor.element_name(&doc), Some("book"));
        assert_eq!(cursor.depth(), 1);
    }

    #[test]
    fn test_first_enter_with_wrong_name_sets_error() {
        let doc = book();
        let mut cursor = Cursor::new();

        assert!(!cursor.enter_element(&doc, "author"));
        assert!(cursor.in_error());
        assert_eq!(cursor.error(), Some(ErrorKind::UnknownNode));
        assert_eq!(cursor.element_name(&doc), None);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_walk_children_and_values() {
        let doc = book();
        let mut cursor = Cursor::new();

        assert!(cursor.enter_element(&doc, "book"));
        assert_eq!(cursor.element_value(), None);

        assert!(cursor.enter_element(&doc, "author"));
        assert_eq!(cursor.element_value(), Some("Jane"));
        cursor.leave_element(&doc);

        assert!(cursor.enter_element(&doc, "title"));
        assert_eq!(cursor.element_value(), Some("Go"));
        cursor.leave_element(&doc);

        assert_eq!(cursor.element_name(&doc), Some("book"));
        assert_eq!(cursor.depth(), 1);
    }

    #[test]
    fn test_depth_symmetry_from_nested_position() {
        let doc = Document::parse_str("<a><b><c><d/></c></b></a>").unwrap();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "a");
        cursor.enter_element(&doc, "b");
        let depth = cursor.depth();

        cursor.enter_element(&doc, "c");
        cursor.enter_element(&doc, "d");
        cursor.leave_element(&doc);
        cursor.leave_element(&doc);

        assert_eq!(cursor.depth(), depth);
        assert_eq!(cursor.element_name(&doc), Some("b"));
    }

    #[test]
    fn test_full_unwind_rests_on_root() {
        let doc = book();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "book");
        cursor.leave_element(&doc);

        assert_eq!(cursor.depth(), 0);
        assert_eq!(cursor.element_name(&doc), Some("book"));
        // From the resting position the candidates are the root's
        // children, so the root's own name no longer matches.
        assert!(!cursor.enter_element(&doc, "book"));
        assert!(cursor.in_error());
    }

    #[test]
    fn test_error_recovery_restores_position() {
        let doc = book();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "book");
        cursor.enter_element(&doc, "author");
        let depth = cursor.depth();

        assert!(!cursor.enter_element(&doc, "missing"));
        assert!(cursor.in_error());
        assert_eq!(cursor.element_name(&doc), None);
        assert_eq!(cursor.depth(), depth);

        cursor.leave_element(&doc);

        assert!(!cursor.in_error());
        assert_eq!(cursor.element_name(&doc), Some("author"));
        assert_eq!(cursor.element_value(), Some("Jane"));
        assert_eq!(cursor.depth(), depth);
    }

    #[test]
    fn test_failed_first_enter_recovers_to_root() {
        let doc = book();
        let mut cursor = Cursor::new();

        assert!(!cursor.enter_element(&doc, "missing"));
        cursor.leave_element(&doc);

        assert!(!cursor.in_error());
        assert_eq!(cursor.element_name(&doc), Some("book"));
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_enter_while_in_error_is_a_noop_failure() {
        let doc = book();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "missing");
        assert!(!cursor.enter_element(&doc, "book"));
        assert!(cursor.in_error());

        cursor.leave_element(&doc);
        assert!(!cursor.in_error());
    }

    #[test]
    fn test_leave_unpositioned_changes_nothing() {
        let doc = book();
        let mut cursor = Cursor::new();

        cursor.leave_element(&doc);

        assert_eq!(cursor.depth(), 0);
        assert!(!cursor.in_error());
        assert_eq!(cursor.element_name(&doc), None);
    }

    #[test]
    fn test_attribute_selection_by_position_and_name() {
        let doc =
            Document::parse_str(r#"<node role="admin" dir="rtl">payload</node>"#).unwrap();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "node");
        assert!(cursor.has_attributes(&doc));
        assert_eq!(cursor.attribute_count(&doc), Some(2));

        assert!(cursor.select_attribute_at(&doc, 0));
        assert_eq!(cursor.attribute_value(), Some("admin"));
        assert_eq!(cursor.selected_attribute_name(&doc), Some("role"));

        assert!(cursor.select_attribute(&doc, "dir"));
        assert_eq!(cursor.attribute_value(), Some("rtl"));
        assert_eq!(cursor.selected_attribute_name(&doc), Some("dir"));

        assert_eq!(cursor.element_value(), Some("payload"));
    }

    #[test]
    fn test_attribute_name_miss_preserves_selection() {
        let doc = Document::parse_str(r#"<node role="admin"/>"#).unwrap();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "node");
        cursor.select_attribute(&doc, "role");

        assert!(!cursor.select_attribute(&doc, "absent"));
        assert_eq!(cursor.attribute_value(), Some("admin"));
        assert_eq!(cursor.selected_attribute_name(&doc), Some("role"));
    }

    #[test]
    fn test_attribute_position_miss_keeps_decoded_value() {
        let doc = Document::parse_str(r#"<node role="admin"/>"#).unwrap();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "node");
        cursor.select_attribute_at(&doc, 0);

        assert!(!cursor.select_attribute_at(&doc, 5));
        assert_eq!(cursor.attribute_value(), Some("admin"));
    }

    #[test]
    fn test_attribute_values_are_decoded() {
        let doc = Document::parse_str(r#"<node title="Fish &amp; Chips"/>"#).unwrap();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "node");
        cursor.select_attribute(&doc, "title");

        assert_eq!(cursor.attribute_value(), Some("Fish & Chips"));
    }

    #[test]
    fn test_successful_enter_drops_attribute_cache() {
        let doc = Document::parse_str(r#"<a role="x"><b/></a>"#).unwrap();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "a");
        cursor.select_attribute(&doc, "role");
        assert_eq!(cursor.attribute_value(), Some("x"));

        cursor.enter_element(&doc, "b");
        assert_eq!(cursor.attribute_value(), None);
        assert_eq!(cursor.selected_attribute_name(&doc), None);
    }

    // The stale read below is the documented contract: attribute_value()
    // skips the error-state and position checks every other read performs.
    #[test]
    fn test_attribute_value_readable_while_in_error() {
        let doc = Document::parse_str(r#"<a role="x"/>"#).unwrap();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "a");
        cursor.select_attribute(&doc, "role");
        cursor.enter_element(&doc, "missing");

        assert!(cursor.in_error());
        assert_eq!(cursor.element_name(&doc), None);
        assert_eq!(cursor.attribute_count(&doc), None);
        assert!(!cursor.has_attributes(&doc));
        assert_eq!(cursor.attribute_value(), Some("x"));
    }

    #[test]
    fn test_readers_fail_in_error_state() {
        let doc = book();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "book");
        cursor.enter_element(&doc, "missing");

        assert_eq!(cursor.element_name(&doc), None);
        assert_eq!(cursor.element_value(), None);
        assert!(!cursor.has_attributes(&doc));
        assert_eq!(cursor.attribute_count(&doc), None);
        assert!(!cursor.select_attribute_at(&doc, 0));
        assert!(!cursor.select_attribute(&doc, "role"));
    }

    #[test]
    fn test_first_match_wins_among_duplicates() {
        let doc =
            Document::parse_str(r#"<a><b id="first"/><b id="second"/></a>"#).unwrap();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "a");
        cursor.enter_element(&doc, "b");
        cursor.select_attribute(&doc, "id");

        assert_eq!(cursor.attribute_value(), Some("first"));
    }

    #[test]
    fn test_name_matching_is_case_sensitive() {
        let doc = Document::parse_str("<Book/>").unwrap();
        let mut cursor = Cursor::new();

        assert!(!cursor.enter_element(&doc, "book"));
        assert!(cursor.in_error());
    }

    #[test]
    fn test_text_nodes_are_never_matched() {
        let doc = Document::parse_str("<a>text</a>").unwrap();
        let mut cursor = Cursor::new();

        cursor.enter_element(&doc, "a");
        assert!(!cursor.enter_element(&doc, "text"));
        assert!(cursor.in_error());
    }

    #[test]
    fn test_enter_matches_root_siblings_in_recovered_document() {
        let doc = Document::parse_str("<a/><b/>").unwrap();
        let mut cursor = Cursor::new();

        assert!(cursor.enter_element(&doc, "b"));
        assert_eq!(cursor.element_name(&doc), Some("b"));
    }
}
