//! Radioplus client error types.

/// Errors from the Radioplus state client.
///
/// Every variant means the current state snapshot could not be obtained;
/// callers map the whole type to a "remote unavailable" outcome. A
/// programme that is simply absent from a healthy snapshot is *not* an
/// error; `locate` reports that as `None`.
#[derive(Debug, thiserror::Error)]
pub enum RadioplusError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// State endpoint returned a non-success status
    #[error("state endpoint returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not a valid state snapshot
    #[error("state parse error: {message}")]
    Parse { message: String },
}
