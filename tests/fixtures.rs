// Fixture tests: note pages and HTML snippets with their expected Markdown.
//
// Each fixture directory contains:
//   index.html  HTML input
//   index.md    expected Markdown output
//
// These tests run the full extraction: HTML string → content root → MDAST
// → Markdown string → normalization.

mod common;

use pretty_assertions::assert_eq;

fn fixture_test(name: &str) {
    let f = common::load_fixture(name);
    let result = note2markdown::extract_markdown(&f.html);
    assert_eq!(result, f.expected_md, "fixture: {}", name);
    common::assert_normalized(&result);
}

#[test]
fn fixture_note_page() { fixture_test("note-page"); }

#[test]
fn fixture_body_fallback() { fixture_test("body-fallback"); }

#[test]
fn fixture_plain_text() { fixture_test("plain-text"); }

#[test]
fn fixture_table() { fixture_test("table"); }

#[test]
fn fixture_nested_list() { fixture_test("nested-list"); }

#[test]
fn fixture_crlf() { fixture_test("crlf"); }

#[test]
fn fixture_empty() { fixture_test("empty"); }
