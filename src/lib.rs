// note2markdown: fetch a note page and turn its content body into Markdown.
//
// Architecture:
//   URL / local file → source → HTML string
//   HTML string → html5ever parse → content root → hast_to_mdast → MDAST → stringify
//   → normalize → Markdown
//
// Reference implementations:
//   - hast-util-to-mdast (transformer): https://github.com/syntax-tree/hast-util-to-mdast
//   - mdast-util-to-markdown (serializer): https://github.com/syntax-tree/mdast-util-to-markdown

mod charset;
mod error;
mod extract;
mod hast_to_mdast;
pub mod mdast;
pub mod normalize;
pub mod source;
mod stringify;

use url::Url;

pub use error::Error;
pub use source::{fetch_html, read_html_file, read_html_source, FetchOptions};
pub use stringify::{HeadingStyle, StringifyOptions};

/// Id of the element that holds a note page's content body.
pub const DEFAULT_CONTENT_ID: &str = "doc";

/// Elements removed together with their content before conversion.
pub const DEFAULT_REMOVE: [&str; 3] = ["script", "style", "noscript"];

/// Elements dropped from the output while keeping their children.
pub const DEFAULT_STRIP: [&str; 1] = ["span"];

/// Extraction options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Serializer formatting options.
    pub stringify: StringifyOptions,
    /// `id` of the preferred content root. Default: `"doc"`.
    pub content_id: String,
    /// Tags removed with everything inside them.
    pub remove: Vec<String>,
    /// Tags that contribute no Markdown syntax, only their children.
    pub strip: Vec<String>,
    /// Base for resolving relative link and image URLs.
    pub base_url: Option<Url>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            stringify: StringifyOptions::default(),
            content_id: DEFAULT_CONTENT_ID.to_string(),
            remove: DEFAULT_REMOVE.iter().map(|t| t.to_string()).collect(),
            strip: DEFAULT_STRIP.iter().map(|t| t.to_string()).collect(),
            base_url: None,
        }
    }
}

impl Options {
    /// Create a new Options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `id` of the preferred content root.
    pub fn with_content_id(mut self, id: impl Into<String>) -> Self {
        self.content_id = id.into();
        self
    }

    /// Replace the list of removed tags.
    pub fn with_remove<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the list of stripped tags.
    pub fn with_strip<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve relative URLs against `base`.
    pub fn with_base_url(mut self, base: Url) -> Self {
        self.base_url = Some(base);
        self
    }

    /// Set the heading style.
    pub fn with_heading_style(mut self, style: HeadingStyle) -> Self {
        self.stringify.heading_style = style;
        self
    }

    /// Set the unordered list bullet character.
    pub fn with_bullet(mut self, bullet: char) -> Self {
        self.stringify.bullet = bullet;
        self
    }

    /// Set the emphasis marker character.
    pub fn with_emphasis(mut self, marker: char) -> Self {
        self.stringify.emphasis = marker;
        self
    }

    /// Set the strong marker character.
    pub fn with_strong(mut self, marker: char) -> Self {
        self.stringify.strong = marker;
        self
    }

    /// Set the fenced code block marker character.
    pub fn with_fence(mut self, fence: char) -> Self {
        self.stringify.fence = fence;
        self
    }

    /// Set the thematic break rule character.
    pub fn with_rule(mut self, rule: char) -> Self {
        self.stringify.rule = rule;
        self
    }

    /// Set whether to close ATX headings with trailing hashes.
    pub fn with_close_atx(mut self, close: bool) -> Self {
        self.stringify.close_atx = close;
        self
    }
}

/// Extract the content body of a note page as Markdown using default options.
///
/// # Examples
///
/// ```
/// let md = note2markdown::extract_markdown(
///     r#"<div id="doc"><h1>Title</h1><p>Hello <b>world</b></p></div>"#,
/// );
/// assert_eq!(md, "# Title\n\nHello **world**\n");
/// ```
pub fn extract_markdown(html: &str) -> String {
    extract_markdown_with(html, &Options::default())
}

/// Extract the content body of a note page as Markdown with custom options.
///
/// The result never contains `\r`, has no trailing whitespace on any line,
/// and ends with exactly one newline.
///
/// # Examples
///
/// ```
/// use note2markdown::{extract_markdown_with, HeadingStyle, Options};
///
/// let options = Options::new().with_heading_style(HeadingStyle::Setext);
/// let md = extract_markdown_with(r#"<div id="doc"><h1>Hello</h1></div>"#, &options);
/// assert_eq!(md, "Hello\n=====\n");
/// ```
pub fn extract_markdown_with(html: &str, options: &Options) -> String {
    extract::extract(html, options)
}

/// Parse HTML, select the content root and transform it into an MDAST tree.
pub fn html_to_mdast(html: &str, options: &Options) -> mdast::Node {
    let content = extract::prepare(html, options);
    hast_to_mdast::transform(&content, options)
}

/// Serialize an MDAST tree to a Markdown string.
pub fn mdast_to_string(node: &mdast::Node, options: &StringifyOptions) -> String {
    stringify::stringify(node, options)
}
