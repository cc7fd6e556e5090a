//! Radioplus state API client.
//!
//! This module provides an HTTP client for the Radioplus state endpoint,
//! a single JSON document describing every station and its on-demand
//! programme collections.
//!
//! Key characteristics of the endpoint:
//! - There is no per-programme lookup; the whole snapshot is fetched and
//!   searched on every request
//! - Programmes are keyed by `collectionID`, a lower-case UUID
//! - Episode timestamps and durations are in **milliseconds**

mod client;
mod error;
mod types;

pub use client::{Located, RadioplusClient, RadioplusConfig};
pub use error::RadioplusError;
pub use types::{Episode, Programme, StationChannel, StationData, StationInfo, StationState};
