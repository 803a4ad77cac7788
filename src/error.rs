use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;

/// Errors that can occur while reading a page or writing its Markdown.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The server answered with a 4xx or 5xx status.
    #[error("{source}")]
    Http {
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },
    /// Connection, DNS, TLS, timeout or malformed URL.
    #[error("{0}")]
    Network(#[source] reqwest::Error),
    /// The local HTML override could not be read as UTF-8 text.
    #[error("cannot read {}: {source}", path.display())]
    ReadHtml {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The Markdown could not be written to the output file.
    #[error("cannot write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::Http { status, source: err },
            None => Error::Network(err),
        }
    }
}

impl Error {
    /// Prefix the command line puts in front of the message on stderr.
    pub fn prefix(&self) -> &'static str {
        match self {
            Error::Http { .. } => "HTTP error",
            Error::Network(_) => "Network error",
            Error::ReadHtml { .. } => "Failed to extract markdown",
            Error::WriteOutput { .. } => "Failed to write output",
        }
    }
}
