// Body decoding for fetched pages.
//
// Order: charset from `Content-Type`, byte order mark, `<meta>` declaration
// in the first 1024 bytes, statistical detection. Detection accepts UTF-8,
// so an undeclared UTF-8 page decodes as UTF-8.

use std::sync::LazyLock;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use regex::bytes::Regex;

/// How far into the body a `<meta>` charset declaration is looked for.
const PRESCAN_LIMIT: usize = 1024;

// Matches both `<meta charset=...>` and the `http-equiv` content form.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta\s[^>]*?charset\s*=\s*["']?\s*([a-z0-9_\-:.]+)"#)
        .expect("META_CHARSET: hardcoded regex is valid")
});

/// `charset` parameter of a `Content-Type` header value.
pub(crate) fn content_type_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Decode an HTML body, using `declared` (a charset label) when it names a
/// known encoding.
pub(crate) fn decode_html(bytes: &[u8], declared: Option<&str>) -> String {
    let encoding = declared
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| Encoding::for_bom(bytes).map(|(encoding, _)| encoding))
        .or_else(|| meta_charset(bytes))
        .unwrap_or_else(|| detect(bytes));

    // `decode` also strips a BOM and lets it override the chosen encoding.
    let (text, used, had_errors) = encoding.decode(bytes);
    tracing::debug!(encoding = used.name(), had_errors, "decoded body");
    text.into_owned()
}

fn meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(PRESCAN_LIMIT)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    let encoding = Encoding::for_label(label.as_bytes())?;
    // A page that reached us as bytes cannot really be UTF-16.
    if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
        return Some(encoding_rs::UTF_8);
    }
    Some(encoding)
}

fn detect(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}
