// Content-root selection and the extraction pipeline.
//
// HTML → RcDom → content root (`#doc`, else `body`, else the document)
// → non-content elements removed → Markdown → normalized text.

pub(crate) mod dom;

use markup5ever_rcdom::Handle;
use url::Url;

use crate::{hast_to_mdast, normalize, stringify, Options};

/// A parsed document narrowed to the subtree that gets converted.
pub(crate) struct ContentDom {
    pub root: Handle,
    /// Base for relative URLs: options merged with the document's `<base>`.
    pub base_url: Option<Url>,
}

/// Parse `html`, pick the content root and prune non-content elements.
pub(crate) fn prepare(html: &str, options: &Options) -> ContentDom {
    let dom = dom::parse_html(html);
    let base_url = document_base(&dom.document, options.base_url.as_ref());
    let root = select_root(&dom.document, &options.content_id);

    let removed = dom::remove_elements(&root, &options.remove);
    tracing::debug!(removed, "removed non-content elements");

    ContentDom { root, base_url }
}

/// Run the whole pipeline and return normalized Markdown.
pub(crate) fn extract(html: &str, options: &Options) -> String {
    let content = prepare(html, options);

    if !dom::has_element_child(&content.root) {
        // Nothing to convert: the root holds bare text.
        let text = dom::text_content(&content.root);
        let text = html_escape::decode_html_entities(&text);
        tracing::debug!(chars = text.len(), "content root is plain text");
        return normalize::collapse_newlines(&text);
    }

    let tree = hast_to_mdast::transform(&content, options);
    let markdown = stringify::stringify(&tree, &options.stringify);
    let markdown = normalize::collapse_newlines(&markdown);
    tracing::debug!(bytes = markdown.len(), "converted content root");
    markdown
}

/// Content root fallback chain: element with `content_id`, then `body`, then
/// the document node itself.
fn select_root(document: &Handle, content_id: &str) -> Handle {
    if let Some(node) = dom::find_by_id(document, content_id) {
        tracing::debug!(id = content_id, "using content container");
        return node;
    }
    if let Some(body) = dom::find_element(document, "body") {
        tracing::warn!(id = content_id, "content container not found, falling back to body");
        return body;
    }
    tracing::warn!(id = content_id, "content container and body not found, using whole document");
    document.clone()
}

/// Resolve the first `<base href>` against the configured base, if any.
fn document_base(document: &Handle, configured: Option<&Url>) -> Option<Url> {
    let href = dom::find_element(document, "base").and_then(|base| dom::get_attr(&base, "href"));
    match (href, configured) {
        (Some(href), Some(base)) => base.join(&href).ok().or_else(|| Some(base.clone())),
        (Some(href), None) => Url::parse(&href).ok(),
        (None, configured) => configured.cloned(),
    }
}
