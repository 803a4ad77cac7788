// Shared utilities for the hast_to_mdast module.

use crate::mdast::{self, Node};

/// Collapse runs of HTML whitespace (space, tab, LF, CR, FF) to one space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c') {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Remove leading and trailing Break nodes and whitespace-only Text nodes.
pub(crate) fn drop_surrounding_breaks(mut nodes: Vec<Node>) -> Vec<Node> {
    fn is_droppable_edge(n: &Node) -> bool {
        matches!(n, Node::Break(_)) || matches!(n, Node::Text(t) if t.value.trim().is_empty())
    }

    let start = nodes
        .iter()
        .position(|n| !is_droppable_edge(n))
        .unwrap_or(nodes.len());
    nodes.drain(..start);

    while nodes.last().is_some_and(is_droppable_edge) {
        nodes.pop();
    }

    nodes
}

/// Check if a list of nodes contains only whitespace-only text.
pub(crate) fn is_whitespace_only(nodes: &[Node]) -> bool {
    nodes.iter().all(|n| match n {
        Node::Text(t) => t.value.trim().is_empty(),
        _ => false,
    })
}

/// Flatten block content into phrasing content, for containers that only
/// hold inline Markdown (headings, table cells). Sibling blocks are kept
/// apart by a space; code blocks become inline code.
pub(crate) fn to_phrasing(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::new();
    for node in nodes {
        if node.is_phrasing() {
            result.push(node);
            continue;
        }
        match node {
            Node::Code(code) => {
                result.push(Node::InlineCode(mdast::InlineCode {
                    value: code.value.replace('\n', " "),
                }));
            }
            Node::ThematicBreak(_) => {}
            mut other => {
                if let Some(children) = other.children_mut() {
                    let children = std::mem::take(children);
                    result.push(Node::text(" "));
                    result.extend(to_phrasing(children));
                    result.push(Node::text(" "));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b\r\n"), "a b ");
        assert_eq!(collapse_whitespace("\u{a0}x"), "\u{a0}x");
    }

    #[test]
    fn drops_edge_breaks() {
        let nodes = vec![
            Node::Break(mdast::Break),
            Node::text(" "),
            Node::text("x"),
            Node::Break(mdast::Break),
        ];
        assert_eq!(drop_surrounding_breaks(nodes), vec![Node::text("x")]);
    }

    #[test]
    fn flattens_paragraphs_for_headings() {
        let nodes = vec![Node::Paragraph(mdast::Paragraph {
            children: vec![Node::text("a")],
        })];
        assert_eq!(
            to_phrasing(nodes),
            vec![Node::text(" "), Node::text("a"), Node::text(" ")]
        );
    }
}
