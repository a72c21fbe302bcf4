use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the session client and the admission layer.
///
/// A clean admit/reject decision is never an error; these variants cover
/// the transport, the response bodies, and targets the service has already
/// forgotten.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("malformed response body: {0}")]
    Encoding(String),

    #[error("session {id} no longer exists")]
    SessionNotFound { id: String },

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
