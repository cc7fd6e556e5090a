//! Episode timing derived at render time.
//!
//! Upstream episodes carry an epoch-millisecond start and a millisecond
//! duration. Feed rendering needs a concrete broadcast window (start and end
//! instants) and a human-readable duration label. Both are computed here as
//! new values; the fetched episode record is never mutated.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Error returned when episode timing cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid episode timing: {reason}")]
pub struct AiringError {
    reason: &'static str,
}

impl AiringError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// The derived broadcast window of one episode.
///
/// `start` is the publish instant (the upstream start plus a configurable
/// offset); `end` is the upstream start plus the episode duration. The offset
/// shifts the start only; the end stays at the unshifted `start + duration`.
///
/// # Examples
///
/// ```
/// use radioplus_server::domain::Airing;
///
/// let airing = Airing::from_millis(1_700_000_000_000, 3_600_000, 1_000).unwrap();
/// assert_eq!(airing.start().timestamp_millis(), 1_700_000_001_000);
/// assert_eq!(airing.end().timestamp_millis(), 1_700_003_600_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Airing {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Airing {
    /// Build an airing from an epoch-millisecond start and duration.
    ///
    /// `offset_ms` is added to the start instant only. Fails when the start
    /// timestamp, the shifted start, or the end falls outside the range
    /// chrono can represent.
    pub fn from_millis(
        start_ms: i64,
        duration_ms: i64,
        offset_ms: i64,
    ) -> Result<Self, AiringError> {
        let base = Utc
            .timestamp_millis_opt(start_ms)
            .single()
            .ok_or_else(|| AiringError::new("start timestamp out of range"))?;

        let start = base
            .checked_add_signed(Duration::milliseconds(offset_ms))
            .ok_or_else(|| AiringError::new("adjusted start out of range"))?;

        let end = base
            .checked_add_signed(Duration::milliseconds(duration_ms))
            .ok_or_else(|| AiringError::new("end time out of range"))?;

        Ok(Self { start, end })
    }

    /// The publish instant (offset already applied).
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// The instant the broadcast ended.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Format a millisecond duration as `H:MM:SS`.
///
/// Hours carry no leading zero; minutes and seconds are zero-padded to two
/// digits. Sub-second remainders are discarded and negative inputs clamp to
/// zero.
///
/// # Examples
///
/// ```
/// use radioplus_server::domain::ms_to_hms;
///
/// assert_eq!(ms_to_hms(5_425_000), "1:30:25");
/// assert_eq!(ms_to_hms(59_000), "0:00:59");
/// ```
pub fn ms_to_hms(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!("{hours}:{minutes:02}:{seconds:02}")
}
