// Implicit paragraph detection and block-in-inline resolution.
//
// Modeled on hast-util-to-mdast/lib/util/wrap.js.
// When a flow container has mixed phrasing + block children, phrasing runs
// are wrapped in implicit Paragraph nodes. Inline wrappers that straddle
// block content (a link around a paragraph, say) are split around it.

use super::util::{drop_surrounding_breaks, is_whitespace_only};
use crate::mdast::{self, Node};

/// Wrap mixed content: phrasing runs become paragraphs, block content passes through.
/// Whitespace-only runs are dropped.
pub(crate) fn wrap(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::new();
    let mut run: Vec<Node> = Vec::new();

    for node in flatten(nodes) {
        if node.is_phrasing() {
            run.push(node);
        } else {
            flush_run(&mut run, &mut result);
            result.push(node);
        }
    }
    flush_run(&mut run, &mut result);

    result
}

fn flush_run(run: &mut Vec<Node>, result: &mut Vec<Node>) {
    if run.is_empty() {
        return;
    }
    let children = drop_surrounding_breaks(std::mem::take(run));
    if !is_whitespace_only(&children) {
        result.push(Node::Paragraph(mdast::Paragraph { children }));
    }
}

/// Whether any node, at any depth, is non-phrasing.
pub(crate) fn wrap_needed(nodes: &[Node]) -> bool {
    nodes
        .iter()
        .any(|node| !node.is_phrasing() || node.children().is_some_and(wrap_needed))
}

/// Split inline wrappers holding block content so that the wrapper is
/// repeated around each phrasing run and pushed inside each block.
fn flatten(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::new();
    for node in nodes {
        let straddles = is_inline_wrapper(&node) && node.children().is_some_and(wrap_needed);
        if straddles {
            result.extend(split(node));
        } else {
            result.push(node);
        }
    }
    result
}

fn is_inline_wrapper(node: &Node) -> bool {
    matches!(
        node,
        Node::Link(_) | Node::Delete(_) | Node::Emphasis(_) | Node::Strong(_)
    )
}

fn split(mut wrapper: Node) -> Vec<Node> {
    let children = wrapper.children_mut().map(std::mem::take).unwrap_or_default();

    let mut result = Vec::new();
    let mut run: Vec<Node> = Vec::new();
    for child in flatten(children) {
        if child.is_phrasing() {
            run.push(child);
            continue;
        }
        if !is_whitespace_only(&run) {
            result.push(with_children(&wrapper, std::mem::take(&mut run)));
        }
        run.clear();
        result.push(push_inside(&wrapper, child));
    }
    if !is_whitespace_only(&run) {
        result.push(with_children(&wrapper, run));
    }
    result
}

/// A copy of `wrapper` (which has no children left) holding `children`.
fn with_children(wrapper: &Node, children: Vec<Node>) -> Node {
    let mut node = wrapper.clone();
    if let Some(slot) = node.children_mut() {
        *slot = children;
    }
    node
}

/// Move the wrapper inside a block: `<a><p>x</p></a>` → paragraph with a link.
fn push_inside(wrapper: &Node, mut block: Node) -> Node {
    match block {
        Node::Heading(ref mut heading) => {
            let inner = std::mem::take(&mut heading.children);
            heading.children.push(with_children(wrapper, inner));
        }
        Node::Paragraph(ref mut paragraph) => {
            let inner = std::mem::take(&mut paragraph.children);
            paragraph.children.push(with_children(wrapper, inner));
        }
        Node::Blockquote(ref mut quote) => {
            let inner = std::mem::take(&mut quote.children);
            quote.children = wrap(vec![with_children(wrapper, inner)]);
        }
        _ => {}
    }
    block
}
