use std::fmt;

/// Base URL of the hosted REST service.
pub const DEFAULT_BASE_URL: &str = "https://rest.coinapi.io/";

const BASE_URL_VAR: &str = "COINAPI_BASE_URL";
const TOKEN_VAR: &str = "COINAPI_TOKEN";

/// Startup configuration for [`CoinApiClient`](crate::CoinApiClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is resolved against.
    pub base_url: String,
    /// API key sent as the `X-API-Key` header.
    pub token: String,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ApiConfig {
    /// Builds a config for the hosted service from a token alone.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            token: token.into(),
        }
    }

    /// Reads `COINAPI_BASE_URL` and `COINAPI_TOKEN` from the environment.
    ///
    /// Missing or set-but-empty variables are reported as a [`ConfigError`],
    /// not a process abort; the caller decides how to recover.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = require_var(BASE_URL_VAR)?;
        let token = require_var(TOKEN_VAR)?;
        Ok(Self { base_url, token })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    let value = std::env::var(name).map_err(|_| ConfigError::MissingVar { name })?;
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyVar { name });
    }
    Ok(value)
}

/// Error raised while assembling client configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing {name} environment variable")]
    MissingVar { name: &'static str },
    /// A required environment variable is set but empty.
    #[error("{name} is set but empty")]
    EmptyVar { name: &'static str },
    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
    /// The HTTP transport could not be initialized.
    #[error("failed to initialize HTTP transport: {message}")]
    Transport { message: String },
}
