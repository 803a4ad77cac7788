// Source reader: one blocking GET, or a local file standing in for it.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::{charset, Error};

/// Browser-like User-Agent sent with the page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Upper bound on the whole request, connect to last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP request options.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the User-Agent header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Obtain the page HTML, from `html_file` when given, otherwise from `url`.
///
/// With a local file the URL is never parsed and no request is made.
pub fn read_html_source(
    url: &str,
    html_file: Option<&Path>,
    options: &FetchOptions,
) -> Result<String, Error> {
    match html_file {
        Some(path) => read_html_file(path),
        None => fetch_html(url, options),
    }
}

/// Read a local HTML file as UTF-8 text.
pub fn read_html_file(path: &Path) -> Result<String, Error> {
    tracing::info!(path = %path.display(), "reading html from file");
    let html = fs::read_to_string(path).map_err(|source| Error::ReadHtml {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(bytes = html.len(), "read html");
    Ok(html)
}

/// Download `url` with a single GET request.
///
/// 4xx/5xx answers become [`Error::Http`]; everything else that goes wrong on
/// the way becomes [`Error::Network`]. The body is decoded with the charset
/// from `Content-Type`; without one, from a byte order mark, a `<meta>`
/// declaration or detection, in that order.
pub fn fetch_html(url: &str, options: &FetchOptions) -> Result<String, Error> {
    tracing::info!(url, "fetching page");
    let client = Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .build()
        .map_err(Error::Network)?;

    let response = client.get(url).send()?.error_for_status()?;
    tracing::debug!(status = %response.status(), final_url = %response.url(), "received response");

    let declared = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset::content_type_charset);
    let body = response.bytes()?;
    tracing::debug!(bytes = body.len(), charset = declared.as_deref(), "read body");

    Ok(charset::decode_html(&body, declared.as_deref()))
}
