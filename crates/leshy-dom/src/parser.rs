//! Best-effort XML parsing into the node arena.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Attribute, Document, Error, Node, NodeId, NodeKind, Result};

/// Parse XML text into a [`Document`].
///
/// Recovery rules: mismatched and unmatched end tags are tolerated,
/// elements still open at end of input keep the content seen so far, and a
/// tokenizer error is fatal only while the tree is still empty. Top-level
/// text and whitespace-only runs between elements never produce nodes.
pub(crate) fn parse_document(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut doc = Document {
        nodes: Vec::new(),
        roots: Vec::new(),
    };
    // Open elements, innermost last.
    let mut stack: Vec<NodeId> = Vec::new();
    // Text run being assembled for the innermost open element. Consecutive
    // text, CDATA and entity-reference events merge into one text node.
    let mut pending = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                flush_text(&mut doc, &stack, &mut pending);
                let id = push_element(&mut doc, &stack, &e);
                stack.push(id);
            }
            Ok(Event::Empty(e)) => {
                flush_text(&mut doc, &stack, &mut pending);
                push_element(&mut doc, &stack, &e);
            }
            Ok(Event::End(_)) => {
                flush_text(&mut doc, &stack, &mut pending);
                stack.pop();
            }
            Ok(Event::Text(e)) => {
                if !stack.is_empty() {
                    pending.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if !stack.is_empty() {
                    pending.push('&');
                    pending.push_str(&String::from_utf8_lossy(e.as_ref()));
                    pending.push(';');
                }
            }
            Ok(Event::CData(e)) => {
                if !stack.is_empty() {
                    // Re-escape so the stored raw form decodes back to the
                    // literal CDATA content.
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    pending.push_str(&quick_xml::escape::escape(text.as_str()));
                }
            }
            Ok(Event::Eof) => {
                flush_text(&mut doc, &stack, &mut pending);
                break;
            }
            // Declarations, comments, processing instructions, doctypes.
            Ok(_) => {}
            Err(e) => {
                // Best-effort recovery: keep whatever already parsed, fail
                // only when nothing did.
                if doc.nodes.is_empty() {
                    return Err(Error::Xml(e.to_string()));
                }
                flush_text(&mut doc, &stack, &mut pending);
                break;
            }
        }
    }

    if doc.roots.is_empty() {
        return Err(Error::NoRootElement);
    }

    Ok(doc)
}

/// Create an element node from a start tag and attach it to the innermost
/// open element, or to the top level when none is open.
fn push_element(doc: &mut Document, stack: &[NodeId], start: &BytesStart<'_>) -> NodeId {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    // Malformed attributes are skipped rather than failing the parse.
    let mut attributes = Vec::new();
    for attr in start.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        attributes.push(Attribute { name: key, value });
    }

    attach(
        doc,
        stack,
        Node {
            kind: NodeKind::Element { name },
            parent: stack.last().copied(),
            children: Vec::new(),
            attributes,
        },
    )
}

/// Attach a completed text run to the innermost open element. Runs that
/// are all whitespace are insignificant and dropped, as is text outside
/// any element.
fn flush_text(doc: &mut Document, stack: &[NodeId], pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let raw = std::mem::take(pending);
    if stack.is_empty() || raw.trim().is_empty() {
        return;
    }
    attach(
        doc,
        stack,
        Node {
            kind: NodeKind::Text { raw },
            parent: stack.last().copied(),
            children: Vec::new(),
            attributes: Vec::new(),
        },
    );
}

/// Add a node to the arena and link it from its parent, or record it as a
/// top-level node when the stack is empty.
fn attach(doc: &mut Document, stack: &[NodeId], node: Node) -> NodeId {
    let id = NodeId(doc.nodes.len() as u32);
    doc.nodes.push(node);
    match stack.last() {
        Some(&parent) => doc.nodes[parent.index()].children.push(id),
        None => doc.roots.push(id),
    }
    id
}
