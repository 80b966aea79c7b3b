//! Pure functions for mapping upstream errors to HTTP status codes.

use super::UpstreamError;

/// Maps an [`UpstreamError`] to the status code served to our caller.
///
/// - `Unavailable` -> 503 (a failing provider is our outage, not the caller's mistake)
/// - `NotFound` -> 404
/// - `Malformed` -> 502 (the provider answered, but with garbage)
/// - `Transport` -> 503
///
/// # Examples
///
/// ```
/// use stagepass_core::upstream::{UpstreamError, upstream_error_to_status_code};
///
/// let error = UpstreamError::Unavailable { status: 500 };
/// assert_eq!(upstream_error_to_status_code(&error), 503);
/// ```
pub fn upstream_error_to_status_code(error: &UpstreamError) -> u16 {
    match error {
        UpstreamError::Unavailable { .. } => 503,
        UpstreamError::NotFound => 404,
        UpstreamError::Malformed(_) => 502,
        UpstreamError::Transport { .. } => 503,
    }
}
