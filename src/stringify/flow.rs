// Block-level container serialization.
//
// Modeled on mdast-util-to-markdown/lib/util/container-flow.js.
// Serializes block children separated by blank lines.

use super::State;
use crate::mdast::Node;

/// Serialize a list of block-level (flow) children with blank lines between them.
/// Used for root, blockquote, and similar containers.
pub(crate) fn container_flow(state: &mut State, children: &[Node]) -> String {
    let mut result = String::new();

    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            result.push_str("\n\n");
        }
        let content = super::handlers::handle(state, child);
        result.push_str(&content);

        // Only directly adjacent lists alternate their bullets.
        if !matches!(child, Node::List(_)) {
            state.bullet_last_used = None;
        }
    }

    result
}

/// Serialize block-level children for a list item, respecting tight/spread.
/// `spread` = true → blank line between children, false → single newline.
pub(crate) fn container_flow_tight(state: &mut State, children: &[Node], spread: bool) -> String {
    let separator = if spread { "\n\n" } else { "\n" };
    children
        .iter()
        .map(|child| super::handlers::handle(state, child))
        .collect::<Vec<_>>()
        .join(separator)
}
