// Context-sensitive escaping for Markdown serialization.
//
// Text is escaped only where a character would otherwise turn into syntax:
// emphasis markers anywhere, table pipes inside cells, and block markers at
// the start of a block.

use std::sync::LazyLock;

use regex::Regex;

// Hardcoded patterns; compilation cannot fail.
static ATX_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}(?:\s|$)").expect("ATX_MARKER: hardcoded regex is valid"));

static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+](?:\s|$)").expect("BULLET_MARKER: hardcoded regex is valid"));

// Thematic breaks, fence openers and setext underlines.
static LINE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:-(?:[ \t]*-){2,}[ \t]*$|`{3,}|~{3,}|=+[ \t]*$)").expect("LINE_RUN: hardcoded regex is valid")
});

static ORDERED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,9})([.)])(\s|$)").expect("ORDERED_MARKER: hardcoded regex is valid")
});

/// Escape characters that would become inline syntax.
pub(crate) fn escape_phrasing(text: &str, in_table: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '*' || c == '_' || (in_table && c == '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a block marker at the very start of a block.
pub(crate) fn escape_at_break_start(text: String) -> String {
    if text.starts_with('>')
        || ATX_MARKER.is_match(&text)
        || BULLET_MARKER.is_match(&text)
        || LINE_RUN.is_match(&text)
    {
        return format!("\\{text}");
    }
    if ORDERED_MARKER.is_match(&text) {
        return ORDERED_MARKER.replace(&text, "${1}\\${2}${3}").into_owned();
    }
    text
}
