//! Helpers shared by the reqwest-backed adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};

/// Errors raised while constructing an HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpAdapterError {
    /// The base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The base URL cannot carry path segments (for example `mailto:`).
    #[error("base URL {url:?} cannot carry a path")]
    CannotBeABase { url: String },
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, HttpAdapterError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, HttpAdapterError> {
    Url::parse(raw.trim()).map_err(|source| HttpAdapterError::InvalidUrl {
        url: raw.to_owned(),
        source,
    })
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, HttpAdapterError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| HttpAdapterError::CannotBeABase {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

pub(crate) fn status_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
