use std::time::Duration;

/// Shared transport and retry configuration, fixed when the client is built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Cap on pooled idle connections per host.
    pub max_idle_connections_per_host: usize,
    /// Maximum number of retries after the initial attempt.
    pub retry_limit: u32,
    /// Fixed wait between retry attempts.
    pub retry_delay: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            max_idle_connections_per_host: 3,
            retry_limit: 4,
            retry_delay: Duration::from_secs(1),
        }
    }
}
