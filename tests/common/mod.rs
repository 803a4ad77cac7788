// Shared test helpers for note2markdown.

use std::fs;
use std::path::Path;

/// A fixture's input HTML and expected Markdown.
pub struct Fixture {
    pub html: String,
    pub expected_md: String,
}

/// Load a test fixture from `test-fixtures/<name>/index.{html,md}`.
pub fn load_fixture(name: &str) -> Fixture {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-fixtures").join(name);
    let html = fs::read_to_string(base.join("index.html"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/index.html", name));
    let expected_md = fs::read_to_string(base.join("index.md"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/index.md", name));

    Fixture { html, expected_md }
}

/// Assert the invariants every extraction result must hold.
pub fn assert_normalized(md: &str) {
    assert!(!md.contains('\r'), "carriage return in output: {md:?}");
    assert!(md.ends_with('\n'), "missing trailing newline: {md:?}");
    assert!(md == "\n" || !md.ends_with("\n\n"), "more than one trailing newline: {md:?}");
    for line in md.lines() {
        assert_eq!(line, line.trim_end(), "trailing whitespace in line {line:?}");
    }
}
