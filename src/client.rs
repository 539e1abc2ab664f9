use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::time::sleep;

use crate::body::to_json_object;
use crate::headers::API_KEY_HEADER;
use crate::retry::{AuthorizationObserver, RetryDecision, RetryPolicy};
use crate::{ApiConfig, ClientOptions, ConfigError, ErrorInfo, QueryParams, Result};

/// HTTP client for the CoinAPI market data REST API.
///
/// One instance owns the shared transport configuration and the retry policy.
/// It is meant to be constructed once at the composition root and passed by
/// reference, or cheaply cloned, wherever requests are made; concurrent
/// requests on the same instance are independent.
#[derive(Clone)]
pub struct CoinApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    options: ClientOptions,
    retry: Arc<RetryPolicy>,
}

impl fmt::Debug for CoinApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl CoinApiClient {
    /// Creates a client for `base_url` with default [`ClientOptions`].
    pub fn new(
        base_url: impl AsRef<str>,
        token: impl Into<String>,
    ) -> std::result::Result<Self, ConfigError> {
        Self::with_options(base_url, token, ClientOptions::default())
    }

    /// Creates a client for the hosted service at
    /// [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL).
    pub fn with_token(token: impl Into<String>) -> std::result::Result<Self, ConfigError> {
        Self::new(crate::DEFAULT_BASE_URL, token)
    }

    /// Creates a client with explicit transport and retry options.
    pub fn with_options(
        base_url: impl AsRef<str>,
        token: impl Into<String>,
        options: ClientOptions,
    ) -> std::result::Result<Self, ConfigError> {
        // Endpoint paths are resolved with `Url::join`, which treats the last
        // path segment of a slash-less base as a file name and would drop it.
        let mut raw = base_url.as_ref().to_owned();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|err| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            message: err.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(options.max_idle_connections_per_host)
            .build()
            .map_err(|err| ConfigError::Transport {
                message: err.to_string(),
            })?;

        let retry = Arc::new(RetryPolicy::new(options.retry_limit, options.retry_delay));
        Ok(Self {
            http,
            base_url,
            token: token.into(),
            options,
            retry,
        })
    }

    /// Creates a client from an [`ApiConfig`].
    pub fn from_config(config: ApiConfig) -> std::result::Result<Self, ConfigError> {
        Self::new(config.base_url, config.token)
    }

    /// Creates a client from `COINAPI_BASE_URL` / `COINAPI_TOKEN`.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::from_config(ApiConfig::from_env()?)
    }

    /// Registers the observer notified when the API reports the credentials
    /// as no longer valid (HTTP 401).
    pub fn set_authorization_observer(&self, observer: Arc<dyn AuthorizationObserver>) {
        self.retry.set_observer(observer);
    }

    /// Retry policy shared by every request on this client.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Sends a GET request and decodes the response body as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: impl Into<QueryParams>,
        headers: HeaderMap,
    ) -> Result<T> {
        let (status, bytes) = self
            .send(Method::GET, path, query.into(), headers, None)
            .await?;
        decode_body(status, bytes)
    }

    /// Sends a GET request, discarding the response body.
    pub async fn get_unit(
        &self,
        path: &str,
        query: impl Into<QueryParams>,
        headers: HeaderMap,
    ) -> Result<()> {
        self.send(Method::GET, path, query.into(), headers, None)
            .await?;
        Ok(())
    }

    /// Fetches raw bytes (binary/image payloads).
    ///
    /// Only transport failures are errors here; the body is returned for any
    /// HTTP status.
    pub async fn get_raw(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.endpoint_url(path, &QueryParams::new())?;
        let response = self
            .http
            .request(Method::GET, url)
            .header(API_KEY_HEADER, &self.token)
            .timeout(self.options.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }

    /// Sends a POST with a JSON body and decodes the response as `T`.
    ///
    /// `query` is appended to the URL; the body travels as JSON.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        query: impl Into<QueryParams>,
        headers: HeaderMap,
    ) -> Result<T> {
        let body = to_json_object(body)?;
        let (status, bytes) = self
            .send(Method::POST, path, query.into(), headers, Some(body))
            .await?;
        decode_body(status, bytes)
    }

    /// Sends a POST with a JSON body, discarding the response body.
    pub async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        query: impl Into<QueryParams>,
        headers: HeaderMap,
    ) -> Result<()> {
        let body = to_json_object(body)?;
        self.send(Method::POST, path, query.into(), headers, Some(body))
            .await?;
        Ok(())
    }

    /// Sends a PUT with a JSON body and decodes the response as `T`.
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        query: impl Into<QueryParams>,
        headers: HeaderMap,
    ) -> Result<T> {
        let body = to_json_object(body)?;
        let (status, bytes) = self
            .send(Method::PUT, path, query.into(), headers, Some(body))
            .await?;
        decode_body(status, bytes)
    }

    /// Sends a PUT with a JSON body, discarding the response body.
    pub async fn put_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        query: impl Into<QueryParams>,
        headers: HeaderMap,
    ) -> Result<()> {
        let body = to_json_object(body)?;
        self.send(Method::PUT, path, query.into(), headers, Some(body))
            .await?;
        Ok(())
    }

    /// Sends a DELETE request and decodes the response body as `T`.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: impl Into<QueryParams>,
        headers: HeaderMap,
    ) -> Result<T> {
        let (status, bytes) = self
            .send(Method::DELETE, path, query.into(), headers, None)
            .await?;
        decode_body(status, bytes)
    }

    /// Sends a DELETE request, discarding the response body.
    pub async fn delete_unit(
        &self,
        path: &str,
        query: impl Into<QueryParams>,
        headers: HeaderMap,
    ) -> Result<()> {
        self.send(Method::DELETE, path, query.into(), headers, None)
            .await?;
        Ok(())
    }

    /// Request/response pipeline shared by every verb method.
    ///
    /// Sends the request, accepts `[200, 300)`, and consults the retry policy
    /// on every failed attempt. Retries resubmit the same logical request and
    /// stay invisible to the caller; only terminal outcomes return.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: QueryParams,
        headers: HeaderMap,
        body: Option<Map<String, Value>>,
    ) -> Result<(StatusCode, Vec<u8>)> {
        let url = self.endpoint_url(path, &query)?;
        let mut attempts = 0u32;
        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .headers(headers.clone())
                .header(API_KEY_HEADER, &self.token)
                .timeout(self.options.timeout);
            if let Some(body) = &body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let bytes = response.bytes().await.map_err(transport_error)?.to_vec();

                    if status.is_success() {
                        return Ok((status, bytes));
                    }

                    match self.retry.classify(Some(status.as_u16()), attempts) {
                        RetryDecision::RetryAfter(delay) => {
                            self.wait_before_retry(delay).await;
                            attempts += 1;
                        }
                        RetryDecision::DoNotRetry => {
                            return Err(ErrorInfo::Http {
                                status: status.as_u16(),
                                body: bytes,
                            });
                        }
                    }
                }
                Err(err) => match self.retry.classify(None, attempts) {
                    RetryDecision::RetryAfter(delay) => {
                        self.wait_before_retry(delay).await;
                        attempts += 1;
                    }
                    RetryDecision::DoNotRetry => return Err(transport_error(err)),
                },
            }
        }
    }

    fn endpoint_url(&self, path: &str, query: &QueryParams) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ErrorInfo::Request {
                message: format!("invalid endpoint path '{path}': {err}"),
            })?;
        query.append_to(&mut url);
        Ok(url)
    }

    async fn wait_before_retry(&self, delay: Duration) {
        #[cfg(feature = "tracing")]
        tracing::debug!("retrying request after {} ms", delay.as_millis());
        sleep(delay).await;
    }
}

fn decode_body<T: DeserializeOwned>(status: StatusCode, bytes: Vec<u8>) -> Result<T> {
    serde_json::from_slice(&bytes).map_err(|err| ErrorInfo::Decode {
        status: status.as_u16(),
        message: err.to_string(),
        body: bytes,
    })
}

fn transport_error(err: reqwest::Error) -> ErrorInfo {
    ErrorInfo::Transport {
        message: err.to_string(),
    }
}
