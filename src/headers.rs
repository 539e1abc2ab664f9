use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

/// Name of the CoinAPI authentication header.
pub(crate) const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Headers for endpoints answering plain text, the service default.
pub fn accept_text_plain() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("text/plain"));
    headers
}

/// Headers for endpoints answering JSON.
pub fn accept_json() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}
