// MDAST → Markdown string serializer.
//
// Modeled on mdast-util-to-markdown (https://github.com/syntax-tree/mdast-util-to-markdown).
// Walks an MDAST tree and emits a Markdown string. All formatting choices
// (heading style, list markers, emphasis characters, etc.) live here.

pub(crate) mod escape;
pub(crate) mod flow;
pub(crate) mod handlers;
pub(crate) mod phrasing;

use crate::mdast::Node;

/// Heading style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    /// `# Heading` (default).
    #[default]
    Atx,
    /// Only for h1/h2; falls back to ATX for h3–h6.
    Setext,
}

/// Serializer configuration.
#[derive(Debug, Clone)]
pub struct StringifyOptions {
    pub heading_style: HeadingStyle,
    /// Unordered list marker.
    pub bullet: char,
    /// Ordered list marker after the number: `.` or `)`.
    pub bullet_ordered: char,
    pub emphasis: char,
    pub strong: char,
    /// Code fence character.
    pub fence: char,
    /// Thematic break character.
    pub rule: char,
    pub rule_repetition: u8,
    /// Close ATX headings with trailing hashes.
    pub close_atx: bool,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            bullet: '*',
            bullet_ordered: '.',
            emphasis: '*',
            strong: '*',
            fence: '`',
            rule: '-',
            rule_repetition: 3,
            close_atx: false,
        }
    }
}

/// Serializer state threaded through all handlers.
pub(crate) struct State<'a> {
    pub options: &'a StringifyOptions,
    /// Current list bullet (may switch to avoid conflicts).
    pub bullet_current: Option<char>,
    /// Previous list's bullet (for alternation).
    pub bullet_last_used: Option<char>,
    /// Whether the next text to be emitted is at the start of a block.
    /// Used to escape block markers (`#`, `>`, `-`, `1.`) there.
    pub at_break: bool,
    /// Whether we're inside a table cell (`|` must be escaped).
    pub in_table: bool,
}

impl<'a> State<'a> {
    pub fn new(options: &'a StringifyOptions) -> Self {
        Self {
            options,
            bullet_current: None,
            bullet_last_used: None,
            at_break: false,
            in_table: false,
        }
    }
}

/// Serialize an MDAST tree to a Markdown string.
pub(crate) fn stringify(node: &Node, options: &StringifyOptions) -> String {
    let mut state = State::new(options);
    let mut output = handlers::handle(&mut state, node);

    // Ensure trailing newline (only if non-empty).
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }

    output
}
