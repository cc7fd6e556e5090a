//! Radioplus state HTTP client.
//!
//! The state endpoint serves one JSON document covering every station and
//! its on-demand programmes; there is no lookup-by-id endpoint. Locating a
//! programme therefore means fetching the whole snapshot and searching it.
//! Every call performs a fresh fetch, with no caching and no retries, so
//! each request observes whatever upstream is serving at that moment.

use std::time::Duration;

use serde::Serialize;

use super::error::RadioplusError;
use super::types::{Programme, StationInfo, StationState};

/// Default URL of the Radioplus state endpoint.
const DEFAULT_STATE_URL: &str = "https://state.radioplus.be";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How much of an unparsable body to keep in the error message.
const BODY_SNIPPET_LEN: usize = 200;

/// Configuration for the Radioplus client.
#[derive(Debug, Clone)]
pub struct RadioplusConfig {
    /// URL of the state endpoint.
    pub state_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl RadioplusConfig {
    /// Create a config with the production state URL and default timeout.
    pub fn new() -> Self {
        Self {
            state_url: DEFAULT_STATE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom state URL (for testing or relocated deployments).
    pub fn with_state_url(mut self, url: impl Into<String>) -> Self {
        self.state_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for RadioplusConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The station + programme pair a locate call resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Located {
    /// Descriptive record of the owning station.
    pub station: StationInfo,

    /// The matching programme with its full episode sequence, unmodified.
    pub programme: Programme,
}

/// Client for the Radioplus state endpoint.
#[derive(Debug, Clone)]
pub struct RadioplusClient {
    http: reqwest::Client,
    state_url: String,
}

impl RadioplusClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RadioplusConfig) -> Result<Self, RadioplusError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            state_url: config.state_url,
        })
    }

    /// Fetch the full state snapshot.
    pub async fn fetch_state(&self) -> Result<Vec<StationState>, RadioplusError> {
        let response = self.http.get(&self.state_url).send().await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RadioplusError::Status {
                status: status.as_u16(),
                message: body.chars().take(BODY_SNIPPET_LEN).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RadioplusError::Parse {
            message: format!(
                "{e} (body: {})",
                body.chars().take(BODY_SNIPPET_LEN).collect::<String>()
            ),
        })
    }

    /// Locate a programme by id.
    ///
    /// Fetches a fresh snapshot and linearly searches each station's
    /// on-demand collections for the first programme whose `collectionID`
    /// equals `programme_id`. The comparison is exact; ids are matched as
    /// received, without case folding.
    ///
    /// Returns `None` when no station carries the programme; that is a
    /// valid outcome signaling absence, not a failure. Fetch and parse
    /// failures propagate as [`RadioplusError`].
    pub async fn locate(&self, programme_id: &str) -> Result<Option<Located>, RadioplusError> {
        let stations = self.fetch_state().await?;

        Ok(stations.into_iter().find_map(|station| {
            let programme = station
                .data
                .ondemandnew
                .into_iter()
                .find(|programme| programme.collection_id == programme_id)?;

            Some(Located {
                station: station.channel.info,
                programme,
            })
        }))
    }
}
