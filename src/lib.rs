//! `coinapi-http` is an async typed HTTP client for the CoinAPI market data
//! REST API.
//!
//! The crate wraps the REST surface with generic verb methods
//! ([`CoinApiClient::get`], [`CoinApiClient::post`], ...) and thin endpoint
//! bindings such as [`CoinApiClient::assets`]. Failed attempts run through a
//! [`RetryPolicy`]: server errors are resubmitted with a fixed delay, a 401
//! raises an out-of-band [`AuthorizationObserver`] signal, and everything
//! else is terminal. All failures surface as a uniform [`ErrorInfo`].

mod assets;
mod body;
mod client;
mod config;
mod error;
mod headers;
mod options;
mod query;
mod retry;

pub use assets::{AssetDto, AssetIconDto, ChainAddressDto};
pub use client::CoinApiClient;
pub use config::{ApiConfig, ConfigError, DEFAULT_BASE_URL};
pub use error::ErrorInfo;
pub use headers::{accept_json, accept_text_plain};
pub use options::ClientOptions;
pub use query::{QueryParams, QueryValue};
pub use retry::{AuthorizationObserver, RetryDecision, RetryPolicy};

pub type Result<T> = std::result::Result<T, ErrorInfo>;
