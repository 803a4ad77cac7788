// Node type handlers for MDAST → Markdown serialization.
//
// One handler per MDAST node type. Each takes a State and Node, returns a String.

use super::phrasing::{container_phrasing, wrap_chomped, HARD_BREAK};
use super::State;
use crate::mdast::{self, AlignKind, Node};

/// Dispatch to the appropriate handler for a node.
pub(crate) fn handle(state: &mut State, node: &Node) -> String {
    match node {
        Node::Root(n) => super::flow::container_flow(state, &n.children),
        Node::Paragraph(n) => handle_paragraph(state, n),
        Node::Heading(n) => handle_heading(state, n),
        Node::ThematicBreak(_) => handle_thematic_break(state),
        Node::Blockquote(n) => handle_blockquote(state, n),
        Node::List(n) => handle_list(state, n),
        Node::ListItem(n) => handle_list_item(state, n, n.spread),
        Node::Code(n) => handle_code(state, n),
        Node::Text(n) => handle_text(state, n),
        Node::Emphasis(n) => handle_emphasis(state, n),
        Node::Strong(n) => handle_strong(state, n),
        Node::InlineCode(n) => handle_inline_code(state, n),
        Node::Break(_) => handle_break(state),
        Node::Link(n) => handle_link(state, n),
        Node::Image(n) => handle_image(state, n),
        Node::Delete(n) => handle_delete(state, n),
        Node::Table(n) => handle_table(state, n),
        // Rows and cells are rendered by the table handler.
        Node::TableRow(_) | Node::TableCell(_) => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Flow (block) handlers
// ---------------------------------------------------------------------------

fn handle_paragraph(state: &mut State, node: &mdast::Paragraph) -> String {
    state.at_break = true;
    let content = container_phrasing(state, &node.children);
    state.at_break = false;
    content.trim_matches(' ').to_string()
}

fn handle_heading(state: &mut State, node: &mdast::Heading) -> String {
    state.at_break = false;
    let content = container_phrasing(state, &node.children);
    state.at_break = false;
    let content = content.trim_matches(' ');

    // Setext for h1/h2 when configured, or when the content spans lines
    // (ATX headings cannot).
    let use_setext = node.depth <= 2
        && (state.options.heading_style == super::HeadingStyle::Setext || content.contains('\n'));

    if use_setext {
        let marker = if node.depth == 1 { '=' } else { '-' };
        let line_len = content.lines().last().map_or(0, |l| l.chars().count());
        let underline: String = std::iter::repeat(marker).take(line_len.max(3)).collect();
        return format!("{content}\n{underline}");
    }

    // Hard breaks first: replacing bare newlines first would corrupt "\\\n".
    let content = content.replace(HARD_BREAK, " ").replace('\n', " ");
    let hashes = "#".repeat(node.depth as usize);
    if state.options.close_atx {
        format!("{hashes} {content} {hashes}")
    } else {
        format!("{hashes} {content}")
    }
}

fn handle_thematic_break(state: &mut State) -> String {
    std::iter::repeat(state.options.rule)
        .take(state.options.rule_repetition as usize)
        .collect()
}

fn handle_blockquote(state: &mut State, node: &mdast::Blockquote) -> String {
    let content = super::flow::container_flow(state, &node.children);
    content
        .lines()
        .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

fn handle_list(state: &mut State, node: &mdast::List) -> String {
    let old_bullet = state.bullet_current;

    if !node.ordered {
        // Two lists in a row with the same bullet would merge into one.
        let bullet = if state.bullet_last_used == Some(state.options.bullet) {
            if state.options.bullet == '*' { '-' } else { '*' }
        } else {
            state.options.bullet
        };
        state.bullet_current = Some(bullet);
    }

    let spread = node
        .children
        .iter()
        .any(|child| matches!(child, Node::ListItem(item) if item.spread));

    let mut items = Vec::with_capacity(node.children.len());
    for (i, child) in node.children.iter().enumerate() {
        let prefix = if node.ordered {
            let number = node.start.unwrap_or(1).saturating_add(i as u32);
            format!("{}{}", number, state.options.bullet_ordered)
        } else {
            state.bullet_current.unwrap_or(state.options.bullet).to_string()
        };

        let content = match child {
            Node::ListItem(item) => handle_list_item(state, item, spread || item.spread),
            other => handle(state, other),
        };
        // Nested lists in one item must not affect the next item's nested lists.
        state.bullet_last_used = None;

        items.push(indent_item(&prefix, &content));
    }

    if !node.ordered {
        state.bullet_last_used = state.bullet_current;
    }
    state.bullet_current = old_bullet;

    items.join(if spread { "\n\n" } else { "\n" })
}

/// Put `prefix` before the first line and indent the rest to match.
fn indent_item(prefix: &str, content: &str) -> String {
    let indent = " ".repeat(prefix.chars().count() + 1);
    let mut lines = content.lines();

    let mut item = match lines.next() {
        Some(first) if !first.is_empty() => format!("{prefix} {first}"),
        _ => prefix.to_string(),
    };
    for line in lines {
        item.push('\n');
        if !line.is_empty() {
            item.push_str(&indent);
            item.push_str(line);
        }
    }
    item
}

fn handle_list_item(state: &mut State, node: &mdast::ListItem, spread: bool) -> String {
    let content = super::flow::container_flow_tight(state, &node.children, spread);

    match node.checked {
        Some(checked) => {
            let checkbox = if checked { "[x]" } else { "[ ]" };
            if content.is_empty() {
                checkbox.to_string()
            } else {
                format!("{checkbox} {content}")
            }
        }
        None => content,
    }
}

fn handle_code(state: &mut State, node: &mdast::Code) -> String {
    let fence_char = state.options.fence;
    // Longest fence-like line inside the code decides the fence length.
    let content_max = node
        .value
        .lines()
        .map(str::trim)
        .filter(|line| line.len() >= 3 && line.chars().all(|c| c == fence_char))
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let fence: String = std::iter::repeat(fence_char).take((content_max + 1).max(3)).collect();
    let info = node.lang.as_deref().unwrap_or("");

    if node.value.is_empty() {
        format!("{fence}{info}\n{fence}")
    } else {
        format!("{fence}{info}\n{}\n{fence}", node.value)
    }
}

// ---------------------------------------------------------------------------
// Phrasing (inline) handlers
// ---------------------------------------------------------------------------

fn handle_text(state: &mut State, node: &mdast::Text) -> String {
    if state.at_break {
        state.at_break = false;
        // Spaces after a break are dropped later; escape what the line will start with.
        let value = node.value.trim_start_matches(' ');
        let escaped = super::escape::escape_phrasing(value, state.in_table);
        super::escape::escape_at_break_start(escaped)
    } else {
        super::escape::escape_phrasing(&node.value, state.in_table)
    }
}

/// The next line starts a new block context, so its first text gets escaped too.
fn handle_break(state: &mut State) -> String {
    state.at_break = true;
    HARD_BREAK.to_string()
}

fn handle_emphasis(state: &mut State, node: &mdast::Emphasis) -> String {
    state.at_break = false;
    let marker = state.options.emphasis.to_string();
    let content = container_phrasing(state, &node.children);
    wrap_chomped(&content, &marker)
}

fn handle_strong(state: &mut State, node: &mdast::Strong) -> String {
    state.at_break = false;
    let marker = state.options.strong.to_string().repeat(2);
    let content = container_phrasing(state, &node.children);
    wrap_chomped(&content, &marker)
}

fn handle_delete(state: &mut State, node: &mdast::Delete) -> String {
    state.at_break = false;
    let content = container_phrasing(state, &node.children);
    wrap_chomped(&content, "~~")
}

fn handle_inline_code(state: &mut State, node: &mdast::InlineCode) -> String {
    state.at_break = false;
    // Choose backtick count to avoid conflicts with content.
    let ticks = "`".repeat(longest_backtick_run(&node.value) + 1);

    let needs_space = node.value.starts_with('`') || node.value.ends_with('`');
    if needs_space {
        format!("{ticks} {} {ticks}", node.value)
    } else {
        format!("{ticks}{}{ticks}", node.value)
    }
}

fn handle_link(state: &mut State, node: &mdast::Link) -> String {
    state.at_break = false;
    let content = container_phrasing(state, &node.children);
    let content = content.trim_matches(' ');

    // Autolink when the text is the URL itself: <https://…>
    let is_autolink = node.title.is_none()
        && matches!(node.children.as_slice(), [Node::Text(t)] if t.value.trim() == node.url)
        && node.url.contains(':')
        && !node.url.chars().any(|c| c <= ' ' || c == '<' || c == '>' || c == '\x7f');
    if is_autolink {
        return format!("<{}>", node.url);
    }

    let url = destination(&node.url);
    match &node.title {
        Some(title) => format!("[{content}]({url} \"{}\")", title.replace('"', "\\\"")),
        None => format!("[{content}]({url})"),
    }
}

fn handle_image(state: &mut State, node: &mdast::Image) -> String {
    state.at_break = false;
    let alt = node.alt.replace('[', "\\[").replace(']', "\\]");
    let url = destination(&node.url);
    match &node.title {
        Some(title) => format!("![{alt}]({url} \"{}\")", title.replace('"', "\\\"")),
        None => format!("![{alt}]({url})"),
    }
}

/// Link destination, in angle brackets when it contains spaces or parens.
fn destination(url: &str) -> String {
    if url.is_empty() || url.contains([' ', '(', ')']) {
        format!("<{}>", url.replace('<', "%3C").replace('>', "%3E"))
    } else {
        url.to_string()
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

fn handle_table(state: &mut State, node: &mdast::Table) -> String {
    let was_in_table = state.in_table;
    state.in_table = true;
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(node.children.len());
    for row in &node.children {
        let Node::TableRow(tr) = row else { continue };
        let mut cells = Vec::with_capacity(tr.children.len());
        for cell in &tr.children {
            let content = match cell {
                Node::TableCell(tc) => {
                    state.at_break = false;
                    container_phrasing(state, &tc.children)
                }
                _ => String::new(),
            };
            // A cell is a single line.
            cells.push(content.trim().replace(HARD_BREAK, " ").replace('\n', " "));
        }
        rows.push(cells);
    }
    state.in_table = was_in_table;

    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    if col_count == 0 {
        return String::new();
    }

    let mut widths = vec![3usize; col_count];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let align = |i: usize| node.align.get(i).copied().flatten();

    let format_row = |cells: &[String]| {
        let padded: Vec<String> = (0..col_count)
            .map(|i| pad_cell(cells.get(i).map_or("", String::as_str), widths[i], align(i)))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(rows[0].as_slice()));
    let separator: Vec<String> = (0..col_count).map(|i| format_separator(widths[i], align(i))).collect();
    lines.push(format!("| {} |", separator.join(" | ")));
    for row in rows.iter().skip(1) {
        lines.push(format_row(row.as_slice()));
    }

    lines.join("\n")
}

fn pad_cell(content: &str, width: usize, align: Option<AlignKind>) -> String {
    let padding = width.saturating_sub(content.chars().count());
    match align {
        Some(AlignKind::Right) => format!("{}{content}", " ".repeat(padding)),
        Some(AlignKind::Center) => {
            let left = padding.div_ceil(2);
            format!("{}{content}{}", " ".repeat(left), " ".repeat(padding - left))
        }
        _ => format!("{content}{}", " ".repeat(padding)),
    }
}

fn format_separator(width: usize, align: Option<AlignKind>) -> String {
    match align {
        Some(AlignKind::Left) => format!(":{}", "-".repeat(width - 1)),
        Some(AlignKind::Right) => format!("{}:", "-".repeat(width - 1)),
        Some(AlignKind::Center) => format!(":{}:", "-".repeat(width - 2)),
        None => "-".repeat(width),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Find the longest consecutive run of backticks in a string.
fn longest_backtick_run(s: &str) -> usize {
    let mut max = 0;
    let mut current = 0;
    for c in s.chars() {
        if c == '`' {
            current += 1;
            max = max.max(current);
        } else {
            current = 0;
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stringify::{stringify, HeadingStyle, StringifyOptions};

    fn render(node: Node) -> String {
        stringify(&node, &StringifyOptions::default())
    }

    fn para(children: Vec<Node>) -> Node {
        Node::Paragraph(mdast::Paragraph { children })
    }

    fn item(children: Vec<Node>) -> Node {
        Node::ListItem(mdast::ListItem {
            spread: false,
            checked: None,
            children,
        })
    }

    #[test]
    fn atx_heading() {
        let node = Node::Heading(mdast::Heading {
            depth: 3,
            children: vec![Node::text("Part")],
        });
        assert_eq!(render(node), "### Part\n");
    }

    #[test]
    fn setext_heading_when_configured() {
        let options = StringifyOptions {
            heading_style: HeadingStyle::Setext,
            ..Default::default()
        };
        let node = Node::Heading(mdast::Heading {
            depth: 2,
            children: vec![Node::text("Sub")],
        });
        assert_eq!(stringify(&node, &options), "Sub\n---\n");
    }

    #[test]
    fn strong_with_inner_space_is_chomped() {
        let node = para(vec![
            Node::text("a"),
            Node::Strong(mdast::Strong {
                children: vec![Node::text(" b ")],
            }),
            Node::text("c"),
        ]);
        assert_eq!(render(node), "a **b** c\n");
    }

    #[test]
    fn ordered_list_numbers_from_start() {
        let node = Node::List(mdast::List {
            ordered: true,
            start: Some(4),
            children: vec![item(vec![para(vec![Node::text("a")])]), item(vec![para(vec![Node::text("b")])])],
        });
        assert_eq!(render(node), "4. a\n5. b\n");
    }

    #[test]
    fn nested_list_is_indented() {
        let inner = Node::List(mdast::List {
            ordered: false,
            start: None,
            children: vec![item(vec![para(vec![Node::text("b")])])],
        });
        let node = Node::List(mdast::List {
            ordered: false,
            start: None,
            children: vec![item(vec![para(vec![Node::text("a")]), inner])],
        });
        assert_eq!(render(node), "* a\n  * b\n");
    }

    #[test]
    fn adjacent_lists_alternate_bullets() {
        let list = || {
            Node::List(mdast::List {
                ordered: false,
                start: None,
                children: vec![item(vec![para(vec![Node::text("x")])])],
            })
        };
        let root = Node::Root(mdast::Root {
            children: vec![list(), list()],
        });
        assert_eq!(render(root), "* x\n\n- x\n");
    }

    #[test]
    fn code_fence_outgrows_content() {
        let node = Node::Code(mdast::Code {
            value: "```\ninner\n```".into(),
            lang: None,
        });
        assert_eq!(render(node), "````\n```\ninner\n```\n````\n");
    }

    #[test]
    fn inline_code_with_backticks() {
        let node = para(vec![Node::InlineCode(mdast::InlineCode { value: "a`b".into() })]);
        assert_eq!(render(node), "``a`b``\n");
    }

    #[test]
    fn link_autolink_and_title() {
        let auto = para(vec![Node::Link(mdast::Link {
            url: "https://example.org".into(),
            title: None,
            children: vec![Node::text("https://example.org")],
        })]);
        assert_eq!(render(auto), "<https://example.org>\n");

        let titled = para(vec![Node::Link(mdast::Link {
            url: "/a b".into(),
            title: Some("T".into()),
            children: vec![Node::text("x")],
        })]);
        assert_eq!(render(titled), "[x](</a b> \"T\")\n");
    }

    #[test]
    fn table_is_padded_and_escaped() {
        let cell = |s: &str| {
            Node::TableCell(mdast::TableCell {
                children: vec![Node::text(s)],
            })
        };
        let node = Node::Table(mdast::Table {
            align: vec![None, Some(AlignKind::Right)],
            children: vec![
                Node::TableRow(mdast::TableRow {
                    children: vec![cell("a"), cell("b")],
                }),
                Node::TableRow(mdast::TableRow {
                    children: vec![cell("x|y"), cell("1")],
                }),
            ],
        });
        assert_eq!(
            render(node),
            "| a    |   b |\n| ---- | --: |\n| x\\|y |   1 |\n"
        );
    }

    #[test]
    fn blockquote_prefixes_every_line() {
        let node = Node::Blockquote(mdast::Blockquote {
            children: vec![para(vec![Node::text("a")]), para(vec![Node::text("b")])],
        });
        assert_eq!(render(node), "> a\n>\n> b\n");
    }

    #[test]
    fn paragraph_start_marker_is_escaped() {
        assert_eq!(render(para(vec![Node::text("# tag")])), "\\# tag\n");
    }

    #[test]
    fn line_after_hard_break_is_escaped() {
        let node = para(vec![Node::text("a"), Node::Break(mdast::Break), Node::text(" # b")]);
        assert_eq!(render(node), "a\\\n\\# b\n");

        let node = para(vec![Node::text("a"), Node::Break(mdast::Break), Node::text("- b")]);
        assert_eq!(render(node), "a\\\n\\- b\n");
    }

    #[test]
    fn only_first_text_after_break_is_escaped() {
        let node = para(vec![
            Node::text("a"),
            Node::Break(mdast::Break),
            Node::Emphasis(mdast::Emphasis { children: vec![Node::text("x")] }),
            Node::text(" - y"),
        ]);
        assert_eq!(render(node), "a\\\n*x* - y\n");
    }
}
