/// Error type returned by this crate.
///
/// Every failed operation surfaces one of these; the underlying transport
/// library's error types never cross the API boundary.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorInfo {
    /// The request could not be built; no network call was made.
    #[error("invalid request: {message}")]
    Request {
        /// What went wrong while assembling the request.
        message: String,
    },
    /// Network-level failure with no HTTP response (DNS, connect, timeout).
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
    /// Non-accepted HTTP status code with raw response body.
    #[error("http error {status}")]
    Http { status: u16, body: Vec<u8> },
    /// The body of an accepted response failed to decode.
    #[error("decode error: {message}")]
    Decode {
        status: u16,
        body: Vec<u8>,
        message: String,
    },
}

impl ErrorInfo {
    /// HTTP status observed for this failure, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request { .. } | Self::Transport { .. } => None,
            Self::Http { status, .. } | Self::Decode { status, .. } => Some(*status),
        }
    }

    /// Raw response bytes captured with this failure, if any.
    pub fn error_data(&self) -> Option<&[u8]> {
        match self {
            Self::Request { .. } | Self::Transport { .. } => None,
            Self::Http { body, .. } | Self::Decode { body, .. } => Some(body),
        }
    }
}
