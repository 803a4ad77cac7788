// html5ever tree helpers: parsing, lookups and pruning on an RcDom.
//
// Walks are iterative so that pathologically deep documents cannot exhaust
// the stack before the converter's own depth limit applies.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML string into an html5ever RcDom.
pub(crate) fn parse_html(html: &str) -> RcDom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(html.as_bytes())
}

/// Tag name of an element node.
pub(crate) fn tag_name(handle: &Handle) -> Option<&str> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Value of an attribute on an element node.
pub(crate) fn get_attr(handle: &Handle, name: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => find_attr(&attrs.borrow(), name),
        _ => None,
    }
}

fn find_attr(attrs: &[Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

/// First node below `root` (in document order) matching `pred`, `root` excluded.
fn find_descendant(root: &Handle, pred: impl Fn(&Handle) -> bool) -> Option<Handle> {
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        if pred(&node) {
            return Some(node);
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    None
}

/// First element whose `id` attribute equals `id`.
pub(crate) fn find_by_id(root: &Handle, id: &str) -> Option<Handle> {
    if id.is_empty() {
        return None;
    }
    find_descendant(root, |node| get_attr(node, "id").as_deref() == Some(id))
}

/// First element with the given tag name.
pub(crate) fn find_element(root: &Handle, tag: &str) -> Option<Handle> {
    find_descendant(root, |node| tag_name(node) == Some(tag))
}

/// Detach every descendant element whose tag is in `tags`. Returns how many
/// subtrees were removed.
pub(crate) fn remove_elements(root: &Handle, tags: &[String]) -> usize {
    if tags.is_empty() {
        return 0;
    }
    let mut removed = 0;
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        let mut children = node.children.borrow_mut();
        let before = children.len();
        children.retain(|child| !tag_name(child).is_some_and(|t| tags.iter().any(|tag| tag == t)));
        removed += before - children.len();
        stack.extend(children.iter().cloned());
    }
    removed
}

/// Whether `handle` has at least one element child.
pub(crate) fn has_element_child(handle: &Handle) -> bool {
    handle
        .children
        .borrow()
        .iter()
        .any(|child| matches!(child.data, NodeData::Element { .. }))
}

/// Concatenated text of all text nodes below `root`, comments excluded.
pub(crate) fn text_content(root: &Handle) -> String {
    let mut text = String::new();
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if let NodeData::Text { ref contents } = node.data {
            text.push_str(&contents.borrow());
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    text
}
