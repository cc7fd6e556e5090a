//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::radioplus::Located;

/// Query parameters for the feed endpoint.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Response format. `json` (any casing) selects the JSON passthrough;
    /// anything else, or absence, selects RSS.
    pub format: Option<String>,
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body.
    pub status: u16,

    /// Reason phrase for the status.
    pub error: String,

    /// Human-readable explanation.
    pub message: String,
}

/// JSON passthrough envelope for `?format=json`.
#[derive(Debug, Serialize)]
pub struct PassthroughBody {
    /// Always 200; mirrors the HTTP status.
    pub status: u16,

    /// Always "OK".
    pub error: String,

    /// The located station and programme, as fetched from upstream.
    pub data: Located,
}
