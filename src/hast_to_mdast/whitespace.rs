// Whitespace normalization for MDAST trees.
//
// Post-processing pass that merges adjacent text nodes, trims whitespace at
// the edges of headings, paragraphs and cells, and drops containers that end
// up with no content.

use crate::mdast::Node;

/// Run whitespace post-processing on an MDAST tree.
pub(crate) fn post_process_whitespace(node: &mut Node) {
    let trims = matches!(
        node,
        Node::Heading(_) | Node::Paragraph(_) | Node::Root(_) | Node::TableCell(_) | Node::Delete(_)
    );

    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            post_process_whitespace(child);
        }

        merge_adjacent_text(children);
        if trims {
            trim_container(children);
        }
        let before = children.len();
        children.retain(|child| !is_empty_text(child) && !is_empty_container(child));

        // Text that sat on both sides of a removed node is now adjacent.
        if children.len() != before {
            merge_adjacent_text(children);
            if trims {
                trim_container(children);
            }
            children.retain(|child| !is_empty_text(child));
        }
    }
}

/// Merge adjacent Text nodes, collapsing the space where both sides have one.
fn merge_adjacent_text(children: &mut Vec<Node>) {
    let mut i = 0;
    while i + 1 < children.len() {
        if is_text(&children[i]) && is_text(&children[i + 1]) {
            if let Node::Text(next) = children.remove(i + 1) {
                if let Node::Text(ref mut current) = children[i] {
                    let next = if current.value.ends_with(' ') {
                        next.value.trim_start_matches(' ').to_string()
                    } else {
                        next.value
                    };
                    current.value.push_str(&next);
                }
            }
        } else {
            i += 1;
        }
    }
}

/// Trim leading/trailing whitespace from the first and last text children.
fn trim_container(children: &mut [Node]) {
    if let Some(Node::Text(ref mut first)) = children.first_mut() {
        first.value = first.value.trim_start_matches([' ', '\t', '\n', '\r']).to_string();
    }
    if let Some(Node::Text(ref mut last)) = children.last_mut() {
        last.value = last.value.trim_end_matches([' ', '\t', '\n', '\r']).to_string();
    }
}

fn is_text(node: &Node) -> bool {
    matches!(node, Node::Text(_))
}

fn is_empty_text(node: &Node) -> bool {
    matches!(node, Node::Text(t) if t.value.is_empty())
}

/// Blocks and inline wrappers whose content vanished.
fn is_empty_container(node: &Node) -> bool {
    let removable = matches!(
        node,
        Node::Paragraph(_)
            | Node::Heading(_)
            | Node::Blockquote(_)
            | Node::Emphasis(_)
            | Node::Strong(_)
            | Node::Delete(_)
            | Node::Link(_)
    );
    removable && node.children().is_some_and(|c| c.is_empty())
}
