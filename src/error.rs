use bytes::Bytes;
use thiserror::Error;

/// Boxed error used at the boundary traits, so implementations outside this
/// crate can report whatever failure type their transport or token source
/// produces.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything an API call can fail with.
///
/// `Decode` and `Remote` are deliberately distinct: the first means the
/// response did not have the agreed shape (contract mismatch or corrupted
/// transport), the second is a well-formed rejection by the service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The access token could not be acquired; nothing was sent.
    #[error("access token unavailable: {source}")]
    Auth { source: BoxError },

    /// The request body could not be serialized to JSON.
    #[error("could not encode request body: {source}")]
    Encode { source: serde_json::Error },

    /// The HTTP transport failed before a response body was received.
    #[error("transport failure for {url}: {source}")]
    Transport { url: String, source: BoxError },

    /// The response bytes did not parse as the expected structure. The raw
    /// payload is kept for diagnosis.
    #[error("could not decode response: {source}")]
    Decode {
        source: serde_json::Error,
        raw: Bytes,
    },

    /// A well-formed response carrying a nonzero error code.
    #[error("remote error {code}: {message}")]
    Remote { code: i64, message: String },

    /// A job spec was rejected client-side before submission.
    #[error("invalid job spec: {0}")]
    InvalidSpec(String),

    /// Building the HTTP client failed (unreadable TLS certificate, etc.).
    #[error("could not build HTTP client: {0}")]
    Config(String),

    /// Polling was abandoned through its cancellation token.
    #[error("polling cancelled")]
    Cancelled,

    /// Polling hit its deadline before the job reached a terminal status.
    #[error("deadline exceeded while polling")]
    DeadlineExceeded,
}

impl Error {
    pub fn auth(source: impl Into<BoxError>) -> Self {
        Error::Auth {
            source: source.into(),
        }
    }

    pub fn transport(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    pub(crate) fn encode(source: serde_json::Error) -> Self {
        Error::Encode { source }
    }
}
