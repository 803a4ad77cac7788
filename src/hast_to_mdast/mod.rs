// HTML tree → MDAST transform
//
// Modeled on hast-util-to-mdast (https://github.com/syntax-tree/hast-util-to-mdast).
// Walks the selected content root of an html5ever tree, dispatching each
// element to a handler that produces MDAST nodes.

pub(crate) mod handlers;
pub(crate) mod util;
pub(crate) mod whitespace;
pub(crate) mod wrap;

use url::Url;

use crate::extract::ContentDom;
use crate::{mdast, Options};

/// Elements nested deeper than this below the content root are skipped.
pub(crate) const MAX_DEPTH: usize = 256;

/// Transformation state threaded through all handlers.
pub(crate) struct State<'a> {
    /// Base for relative link and image URLs.
    pub base_url: Option<Url>,
    /// Whether we're currently inside a table (nested tables → text).
    pub in_table: bool,
    /// Element nesting depth below the content root.
    pub depth: usize,
    /// Tags rendered as their children only.
    pub strip: &'a [String],
}

impl<'a> State<'a> {
    fn new(base_url: Option<Url>, options: &'a Options) -> Self {
        Self {
            base_url,
            in_table: false,
            depth: 0,
            strip: &options.strip,
        }
    }

    /// Resolve a URL against the base URL, leaving it as-is when that fails.
    pub fn resolve(&self, raw: &str) -> String {
        if let Some(base) = &self.base_url {
            if let Ok(resolved) = base.join(raw) {
                return resolved.to_string();
            }
        }
        raw.to_string()
    }

    pub fn is_stripped(&self, tag: &str) -> bool {
        self.strip.iter().any(|t| t == tag)
    }
}

/// Transform the content root of a prepared document into an MDAST tree.
pub(crate) fn transform(content: &ContentDom, options: &Options) -> mdast::Node {
    let mut state = State::new(content.base_url.clone(), options);

    let children = handlers::one(&mut state, &content.root);
    let children = wrap::wrap(children);

    let mut root = mdast::Node::Root(mdast::Root { children });
    whitespace::post_process_whitespace(&mut root);
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::prepare;
    use crate::mdast::{Heading, Node, Paragraph, Root, Strong};

    fn tree(html: &str) -> Node {
        let options = Options::default();
        transform(&prepare(html, &options), &options)
    }

    #[test]
    fn heading_and_paragraph() {
        let node = tree(r#"<div id="doc"><h1>Title</h1><p>Hello <b>world</b></p></div>"#);
        assert_eq!(
            node,
            Node::Root(Root {
                children: vec![
                    Node::Heading(Heading {
                        depth: 1,
                        children: vec![Node::text("Title")],
                    }),
                    Node::Paragraph(Paragraph {
                        children: vec![
                            Node::text("Hello "),
                            Node::Strong(Strong {
                                children: vec![Node::text("world")],
                            }),
                        ],
                    }),
                ],
            })
        );
    }

    #[test]
    fn loose_text_is_wrapped_in_paragraph() {
        let node = tree(r#"<div id="doc">  lead <em>x</em> <p>block</p> tail </div>"#);
        let children = node.children().unwrap();
        assert_eq!(children.len(), 3);
        assert!(children.iter().all(|c| matches!(c, Node::Paragraph(_))));
    }

    #[test]
    fn resolves_against_base() {
        let options = Options::new().with_base_url(Url::parse("https://notes.example.org/s/abc").unwrap());
        let node = transform(&prepare(r#"<div id="doc"><a href="img/x.png">x</a></div>"#, &options), &options);
        let Node::Paragraph(p) = &node.children().unwrap()[0] else {
            panic!("expected paragraph: {node:?}");
        };
        let Node::Link(link) = &p.children[0] else {
            panic!("expected link: {p:?}");
        };
        assert_eq!(link.url, "https://notes.example.org/s/img/x.png");
    }
}
