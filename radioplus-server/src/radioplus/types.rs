//! Radioplus state snapshot DTOs.
//!
//! These types map directly to the JSON document served by the state
//! endpoint: an array of station entries, each wrapping the channel's
//! descriptive info and its on-demand programme collections. Cosmetic
//! fields default to empty strings because upstream omits them now and
//! then. An episode record missing its timing or stream URL cannot
//! become a feed item, so such records are skipped during
//! deserialization; one broken episode anywhere in the snapshot must
//! not make every other programme unreachable.
//!
//! The types serialize back out with their upstream field names for the
//! `?format=json` passthrough.

use serde::{Deserialize, Serialize};

/// One station entry in the state snapshot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationState {
    /// Channel wrapper holding the station's descriptive info.
    pub channel: StationChannel,

    /// Per-station data, including the on-demand collections.
    pub data: StationData,
}

/// Wrapper around the station's descriptive record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationChannel {
    /// Station name, website and description.
    pub info: StationInfo,
}

/// Descriptive fields of a broadcaster channel.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationInfo {
    /// Display name of the station (e.g. "Radio 1").
    #[serde(default)]
    pub name: String,

    /// Public website of the station.
    #[serde(default)]
    pub website: String,

    /// One-line description of the station.
    #[serde(default)]
    pub description: String,
}

/// The data block of a station entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationData {
    /// On-demand programme collections for this station.
    #[serde(default)]
    pub ondemandnew: Vec<Programme>,
}

/// An on-demand programme collection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Programme {
    /// Stable programme identifier in UUID form.
    #[serde(rename = "collectionID", default)]
    pub collection_id: String,

    /// Display name of the programme.
    #[serde(default)]
    pub name: String,

    /// Description of the programme.
    #[serde(default)]
    pub description: String,

    /// Artwork URL for the programme.
    #[serde(default)]
    pub image: String,

    /// Recent episodes, most recent first (source order is preserved).
    /// Records missing their timing or stream URL are skipped.
    #[serde(default, deserialize_with = "lenient_episodes")]
    pub items: Vec<Episode>,
}

/// A single on-demand episode.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Broadcast start as epoch milliseconds.
    pub start_time: i64,

    /// Episode length in milliseconds.
    pub duration: i64,

    /// URL of the audio stream.
    pub stream: String,

    /// Description of the episode.
    #[serde(default)]
    pub description: String,

    /// Upstream episode title (unused in feed items, which carry the
    /// broadcast window instead).
    #[serde(default)]
    pub title: String,
}

/// Deserialize an episode list, dropping records that do not form a
/// usable episode.
///
/// Upstream occasionally ships an episode without its timing or stream
/// URL. Each element is converted individually so that one such record
/// costs only itself, not the whole snapshot.
fn lenient_episodes<'de, D>(deserializer: D) -> Result<Vec<Episode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;

    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(episode) => Some(episode),
            Err(e) => {
                tracing::warn!("skipping unusable episode record: {e}");
                None
            }
        })
        .collect())
}
