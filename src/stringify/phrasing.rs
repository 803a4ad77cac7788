// Inline container serialization.
//
// Modeled on mdast-util-to-markdown/lib/util/container-phrasing.js.
// Serializes inline children flush together.

use super::State;
use crate::mdast::Node;

/// Hard break as emitted by the break handler.
pub(crate) const HARD_BREAK: &str = "\\\n";

/// Serialize a list of inline (phrasing) children.
pub(crate) fn container_phrasing(state: &mut State, children: &[Node]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(children.len());

    for child in children {
        parts.push(super::handlers::handle(state, child));
    }

    // Spaces next to a hard break would end up as trailing or leading
    // whitespace on a line: drop them.
    for i in 0..parts.len() {
        if parts[i] == HARD_BREAK {
            if i > 0 {
                let prev = parts[i - 1].trim_end_matches(' ').to_string();
                parts[i - 1] = prev;
            }
            if i + 1 < parts.len() {
                let next = parts[i + 1].trim_start_matches(' ').to_string();
                parts[i + 1] = next;
            }
        }
    }

    parts.join("")
}

/// Move whitespace at the edges of `content` outside of `marker`.
///
/// `**a **` is not strong emphasis in CommonMark, `**a** ` is.
pub(crate) fn wrap_chomped(content: &str, marker: &str) -> String {
    let trimmed = content.trim_matches(' ');
    if trimmed.is_empty() {
        return content.to_string();
    }
    let leading = if content.starts_with(' ') { " " } else { "" };
    let trailing = if content.ends_with(' ') { " " } else { "" };
    format!("{leading}{marker}{trimmed}{marker}{trailing}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chomps_edge_spaces() {
        assert_eq!(wrap_chomped(" a b ", "**"), " **a b** ");
        assert_eq!(wrap_chomped("x", "*"), "*x*");
    }
}
