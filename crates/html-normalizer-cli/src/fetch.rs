//! Fetching HTML over HTTP(S).

use std::time::Duration;

use html_normalizer_rs::charset_from_content_type;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

/// User agent sent when `--user-agent` is not given.
pub const DEFAULT_USER_AGENT: &str = concat!("html-normalizer/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of a fetched page together with the charset its server declared.
pub struct FetchedPage {
    /// Raw response body.
    pub body: Vec<u8>,
    /// `charset` parameter of the `Content-Type` header, if any.
    pub charset: Option<String>,
}

/// GET `url` and return its body. Non-2xx statuses are errors.
pub fn fetch_url(url: &str, user_agent: &str) -> Result<FetchedPage, reqwest::Error> {
    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    tracing::debug!(url, user_agent, "fetching HTML");
    let response = client.get(url).send()?.error_for_status()?;

    let charset = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset_from_content_type)
        .map(str::to_string);
    let body = response.bytes()?.to_vec();
    tracing::debug!(bytes = body.len(), charset = charset.as_deref(), "fetched HTML");

    Ok(FetchedPage { body, charset })
}
