use thiserror::Error;

/// Errors from the external ticketing provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The provider answered with a non-success status.
    #[error("upstream returned status {status}")]
    Unavailable { status: u16 },
    /// The provider reports no event for the requested id.
    #[error("event not found upstream")]
    NotFound,
    /// The response body could not be interpreted at all. Missing nested
    /// fields are not malformed; they normalize to nulls.
    #[error("malformed upstream response: {0}")]
    Malformed(String),
    /// The request never produced a response.
    #[error("upstream transport error: {message}")]
    Transport { message: String, timed_out: bool },
}

impl UpstreamError {
    /// Returns true if the request timed out rather than being refused.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Transport { timed_out: true, .. })
    }
}
