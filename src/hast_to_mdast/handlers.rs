// Element handlers: one function per HTML element or element group.
//
// Each handler takes an html5ever node and returns zero or more MDAST nodes.
// Handlers only produce tree nodes. Formatting happens in stringify.

use markup5ever_rcdom::{Handle, NodeData};

use super::util::{collapse_whitespace, drop_surrounding_breaks, is_whitespace_only, to_phrasing};
use super::wrap::{wrap, wrap_needed};
use super::{State, MAX_DEPTH};
use crate::extract::dom::{get_attr, tag_name, text_content};
use crate::mdast::{self, Node};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Convert all children of an HTML node to MDAST nodes.
pub(crate) fn all(state: &mut State, handle: &Handle) -> Vec<Node> {
    let children = handle.children.borrow();
    let mut result = Vec::new();
    for child in children.iter() {
        result.append(&mut one(state, child));
    }
    result
}

/// Convert a single HTML node to MDAST node(s).
pub(crate) fn one(state: &mut State, handle: &Handle) -> Vec<Node> {
    match &handle.data {
        NodeData::Text { ref contents } => {
            let text = collapse_whitespace(&contents.borrow());
            if text.is_empty() {
                vec![]
            } else {
                vec![Node::text(text)]
            }
        }
        NodeData::Element { ref name, .. } => {
            if state.depth >= MAX_DEPTH {
                tracing::trace!(tag = %name.local, "nesting too deep, skipping subtree");
                return vec![];
            }
            state.depth += 1;
            let nodes = dispatch_element(state, handle, name.local.as_ref());
            state.depth -= 1;
            nodes
        }
        NodeData::Document => all(state, handle),
        // Comments, doctypes and processing instructions carry no content.
        _ => vec![],
    }
}

/// Route an element to its handler based on tag name.
fn dispatch_element(state: &mut State, handle: &Handle, tag: &str) -> Vec<Node> {
    if state.is_stripped(tag) {
        return all(state, handle);
    }

    match tag {
        // Ignored
        "applet" | "area" | "base" | "basefont" | "bgsound" | "caption" | "col" | "colgroup"
        | "command" | "datalist" | "dialog" | "embed" | "frame" | "frameset" | "head"
        | "iframe" | "input" | "keygen" | "link" | "math" | "menuitem" | "meta" | "noembed"
        | "noframes" | "optgroup" | "option" | "param" | "script" | "select" | "source"
        | "style" | "svg" | "template" | "title" | "track" | "wbr" => vec![],

        // Pass-through: children only, no wrapping
        "abbr" | "acronym" | "audio" | "bdi" | "bdo" | "big" | "blink" | "button" | "canvas"
        | "cite" | "data" | "dfn" | "font" | "ins" | "label" | "map" | "mark" | "marquee"
        | "meter" | "nobr" | "noscript" | "object" | "output" | "progress" | "q" | "rb"
        | "rbc" | "rp" | "rt" | "rtc" | "ruby" | "slot" | "small" | "span" | "sub" | "sup"
        | "tbody" | "tfoot" | "thead" | "time" | "u" | "video" => all(state, handle),

        // Flow wrappers: children wrapped as flow content
        "address" | "article" | "aside" | "body" | "center" | "dd" | "details" | "div"
        | "dl" | "dt" | "fieldset" | "figcaption" | "figure" | "footer" | "form" | "header"
        | "hgroup" | "html" | "legend" | "li" | "main" | "menu" | "multicol" | "nav"
        | "picture" | "section" | "summary" => wrap(all(state, handle)),

        "a" => link(state, handle),
        "blockquote" => blockquote(state, handle),
        "br" => vec![Node::Break(mdast::Break)],
        "code" | "kbd" | "samp" | "tt" | "var" => inline_code(handle),
        "pre" | "listing" | "xmp" | "plaintext" => code(handle),
        "del" | "s" | "strike" => {
            vec![Node::Delete(mdast::Delete { children: all(state, handle) })]
        }
        "em" | "i" => vec![Node::Emphasis(mdast::Emphasis { children: all(state, handle) })],
        "strong" | "b" => vec![Node::Strong(mdast::Strong { children: all(state, handle) })],
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => heading(state, handle, tag),
        "hr" => vec![Node::ThematicBreak(mdast::ThematicBreak)],
        "img" | "image" => image(state, handle),
        "ol" => list(state, handle, true),
        "ul" | "dir" => list(state, handle, false),
        "p" => paragraph(state, handle),
        "table" => table(state, handle),

        // Unknown elements: children only
        _ => all(state, handle),
    }
}

// ---------------------------------------------------------------------------
// Flow handlers
// ---------------------------------------------------------------------------

fn paragraph(state: &mut State, handle: &Handle) -> Vec<Node> {
    let children = drop_surrounding_breaks(all(state, handle));
    if wrap_needed(&children) {
        // Block content inside <p> (only reachable through odd parser recovery).
        return wrap(children);
    }
    vec![Node::Paragraph(mdast::Paragraph { children })]
}

fn heading(state: &mut State, handle: &Handle, tag: &str) -> Vec<Node> {
    // "h1".."h6": the digit is always present and in range.
    let depth = tag[1..].parse::<u8>().unwrap_or(1);
    let children = to_phrasing(all(state, handle));
    vec![Node::Heading(mdast::Heading { depth, children })]
}

fn blockquote(state: &mut State, handle: &Handle) -> Vec<Node> {
    let children = wrap(all(state, handle));
    vec![Node::Blockquote(mdast::Blockquote { children })]
}

fn code(handle: &Handle) -> Vec<Node> {
    let value = text_content(handle);
    let value = value.trim_end_matches(['\n', '\r']).to_string();
    let lang = code_language(handle);
    vec![Node::Code(mdast::Code { value, lang })]
}

/// Language from a `language-*` or `lang-*` class on the `<pre>` or its first
/// `<code>` child.
fn code_language(handle: &Handle) -> Option<String> {
    let code_child = handle
        .children
        .borrow()
        .iter()
        .find(|child| tag_name(child) == Some("code"))
        .cloned();

    std::iter::once(handle.clone())
        .chain(code_child)
        .filter_map(|node| get_attr(&node, "class"))
        .find_map(|class| {
            class.split_whitespace().find_map(|name| {
                name.strip_prefix("language-")
                    .or_else(|| name.strip_prefix("lang-"))
                    .filter(|lang| !lang.is_empty())
                    .map(str::to_string)
            })
        })
}

fn list(state: &mut State, handle: &Handle, ordered: bool) -> Vec<Node> {
    let mut items: Vec<Node> = Vec::new();

    let children: Vec<Handle> = handle.children.borrow().iter().cloned().collect();
    for child in &children {
        if tag_name(child) == Some("li") {
            items.push(list_item(state, child));
            continue;
        }

        let nodes = one(state, child);
        if is_whitespace_only(&nodes) {
            continue;
        }
        // Stray content, typically a nested list placed directly in the
        // parent list: attach it to the preceding item.
        match items.last_mut() {
            Some(Node::ListItem(item)) => item.children.extend(wrap(nodes)),
            _ => items.push(Node::ListItem(mdast::ListItem {
                spread: false,
                checked: None,
                children: wrap(nodes),
            })),
        }
    }

    if items.is_empty() {
        return vec![];
    }

    let start = if ordered {
        get_attr(handle, "start").and_then(|s| s.trim().parse::<u32>().ok())
    } else {
        None
    };

    vec![Node::List(mdast::List { ordered, start, children: items })]
}

fn list_item(state: &mut State, handle: &Handle) -> Node {
    let checked = task_checkbox(handle);
    let children = wrap(all(state, handle));
    let paragraphs = children.iter().filter(|c| matches!(c, Node::Paragraph(_))).count();

    Node::ListItem(mdast::ListItem {
        spread: paragraphs > 1,
        checked,
        children,
    })
}

/// State of a leading `<input type="checkbox">`, as in rendered task lists.
fn task_checkbox(handle: &Handle) -> Option<bool> {
    let children = handle.children.borrow();
    let first = children.iter().find(|child| match child.data {
        NodeData::Text { ref contents } => !contents.borrow().trim().is_empty(),
        NodeData::Element { .. } => true,
        _ => false,
    })?;

    let is_checkbox = tag_name(first) == Some("input")
        && get_attr(first, "type").is_some_and(|t| t.eq_ignore_ascii_case("checkbox"));
    is_checkbox.then(|| get_attr(first, "checked").is_some())
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

fn table(state: &mut State, handle: &Handle) -> Vec<Node> {
    if state.in_table {
        return to_phrasing(all(state, handle));
    }

    let rows = table_rows(handle);
    state.in_table = true;
    let mut align = Vec::new();
    let mut children = Vec::new();
    for row in &rows {
        let cells: Vec<Handle> = row
            .children
            .borrow()
            .iter()
            .filter(|c| matches!(tag_name(c), Some("td" | "th")))
            .cloned()
            .collect();
        if cells.is_empty() {
            continue;
        }
        if children.is_empty() {
            align = cells.iter().map(cell_align).collect();
        }
        let cells: Vec<Node> = cells
            .iter()
            .map(|cell| {
                Node::TableCell(mdast::TableCell {
                    children: to_phrasing(all(state, cell)),
                })
            })
            .collect();
        children.push(Node::TableRow(mdast::TableRow { children: cells }));
    }
    state.in_table = false;

    if children.is_empty() {
        return vec![];
    }
    vec![Node::Table(mdast::Table { align, children })]
}

/// `<tr>` elements of a table, looking through `thead`/`tbody`/`tfoot`.
fn table_rows(handle: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in handle.children.borrow().iter() {
        match tag_name(child) {
            Some("tr") => rows.push(child.clone()),
            Some("thead" | "tbody" | "tfoot") => rows.extend(
                child
                    .children
                    .borrow()
                    .iter()
                    .filter(|c| tag_name(c) == Some("tr"))
                    .cloned(),
            ),
            _ => {}
        }
    }
    rows
}

fn cell_align(cell: &Handle) -> Option<mdast::AlignKind> {
    match get_attr(cell, "align")?.to_ascii_lowercase().as_str() {
        "left" => Some(mdast::AlignKind::Left),
        "right" => Some(mdast::AlignKind::Right),
        "center" => Some(mdast::AlignKind::Center),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Phrasing handlers
// ---------------------------------------------------------------------------

fn link(state: &mut State, handle: &Handle) -> Vec<Node> {
    let children = all(state, handle);
    let href = get_attr(handle, "href").filter(|h| !h.trim().is_empty());
    match href {
        Some(href) if !is_whitespace_only(&children) => vec![Node::Link(mdast::Link {
            url: state.resolve(href.trim()),
            title: get_attr(handle, "title"),
            children,
        })],
        _ => children,
    }
}

fn image(state: &mut State, handle: &Handle) -> Vec<Node> {
    let Some(src) = get_attr(handle, "src").filter(|s| !s.trim().is_empty()) else {
        return vec![];
    };
    vec![Node::Image(mdast::Image {
        url: state.resolve(src.trim()),
        title: get_attr(handle, "title"),
        alt: get_attr(handle, "alt").unwrap_or_default(),
    })]
}

fn inline_code(handle: &Handle) -> Vec<Node> {
    let value = collapse_whitespace(&text_content(handle));
    if value.trim().is_empty() {
        return vec![];
    }
    vec![Node::InlineCode(mdast::InlineCode { value })]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::prepare;
    use crate::Options;

    fn convert(html: &str) -> Vec<Node> {
        let options = Options::default();
        let content = prepare(html, &options);
        let mut state = State::new(content.base_url.clone(), &options);
        all(&mut state, &content.root)
    }

    #[test]
    fn pre_keeps_whitespace_and_language() {
        let nodes = convert("<div id=\"doc\"><pre><code class=\"hljs language-rust\">fn main() {\n    x();\n}\n</code></pre></div>");
        assert_eq!(
            nodes,
            vec![Node::Code(mdast::Code {
                value: "fn main() {\n    x();\n}".into(),
                lang: Some("rust".into()),
            })]
        );
    }

    #[test]
    fn paragraph_edge_breaks_dropped() {
        let nodes = convert(r#"<div id="doc"><p><br>a<br>b<br> <br></p></div>"#);
        assert_eq!(
            nodes,
            vec![Node::Paragraph(mdast::Paragraph {
                children: vec![Node::text("a"), Node::Break(mdast::Break), Node::text("b")],
            })]
        );
    }

    #[test]
    fn span_is_stripped() {
        let nodes = convert(r#"<div id="doc"><span class="a">one</span><span>two</span></div>"#);
        assert_eq!(nodes, vec![Node::text("one"), Node::text("two")]);
    }

    #[test]
    fn link_without_href_is_text() {
        let nodes = convert(r#"<div id="doc"><a name="anchor">here</a></div>"#);
        assert_eq!(nodes, vec![Node::text("here")]);
    }

    #[test]
    fn ordered_list_start() {
        let nodes = convert(r#"<div id="doc"><ol start="3"><li>a</li><li>b</li></ol></div>"#);
        let [Node::List(list)] = nodes.as_slice() else {
            panic!("expected a list: {nodes:?}");
        };
        assert!(list.ordered);
        assert_eq!(list.start, Some(3));
        assert_eq!(list.children.len(), 2);
    }

    #[test]
    fn nested_list_directly_in_list_joins_previous_item() {
        let nodes = convert(r#"<div id="doc"><ul><li>a</li><ul><li>b</li></ul></ul></div>"#);
        let [Node::List(list)] = nodes.as_slice() else {
            panic!("expected a list: {nodes:?}");
        };
        assert_eq!(list.children.len(), 1);
        let Node::ListItem(item) = &list.children[0] else {
            panic!("expected item");
        };
        assert!(matches!(item.children.last(), Some(Node::List(_))));
    }

    #[test]
    fn task_list_checkbox() {
        let nodes = convert(
            r#"<div id="doc"><ul><li><input type="checkbox" checked> done</li><li><input type="checkbox"> todo</li></ul></div>"#,
        );
        let [Node::List(list)] = nodes.as_slice() else {
            panic!("expected a list: {nodes:?}");
        };
        let checked: Vec<Option<bool>> = list
            .children
            .iter()
            .map(|item| match item {
                Node::ListItem(li) => li.checked,
                _ => None,
            })
            .collect();
        assert_eq!(checked, vec![Some(true), Some(false)]);
    }

    #[test]
    fn table_alignment_from_first_row() {
        let nodes = convert(
            r#"<div id="doc"><table><tr><th align="right">n</th><th>x</th></tr><tr><td>1</td><td>2</td></tr></table></div>"#,
        );
        let [Node::Table(table)] = nodes.as_slice() else {
            panic!("expected a table: {nodes:?}");
        };
        assert_eq!(table.align, vec![Some(mdast::AlignKind::Right), None]);
        assert_eq!(table.children.len(), 2);
    }

    #[test]
    fn deep_nesting_is_cut_off() {
        let html = "<div id=\"doc\">".to_string() + &"<span>".repeat(MAX_DEPTH + 10) + "deep";
        assert!(convert(&html).is_empty());
    }
}
