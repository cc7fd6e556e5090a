//! Rendering configuration for podcast feeds.

use chrono_tz::Tz;

use super::locale::Locale;

/// Configuration parameters for feed rendering.
///
/// One renderer serves every feed variant; the differences between
/// variants (templates, iTunes tags, id validation, JSON passthrough,
/// the start-time adjustment) are all expressed here.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Day/month names and description templates.
    pub locale: Locale,

    /// Time zone episode air times are displayed in.
    pub timezone: Tz,

    /// Whether to emit the iTunes podcast namespace tags.
    pub itunes: bool,

    /// Flat offset added to every episode start time (milliseconds).
    /// Upstream start times sit exactly on the minute boundary; the
    /// published feeds have always shifted them forward by one second.
    /// The end time is not shifted.
    pub start_offset_ms: i64,

    /// Whether the HTTP surface rejects malformed programme ids with 400
    /// before contacting upstream.
    pub validate_ids: bool,

    /// Whether `?format=json` returns the located data as JSON instead
    /// of rendering XML.
    pub json_passthrough: bool,

    /// RSS language code.
    pub language: &'static str,

    /// iTunes owner name.
    pub owner: &'static str,

    /// Rights holder named in the copyright line, ahead of "© {year}".
    pub copyright_holder: &'static str,

    /// Category tags applied to every feed.
    pub categories: Vec<&'static str>,

    /// Feed TTL in minutes.
    pub ttl_minutes: u32,

    /// Generator string embedded in the feed.
    pub generator: &'static str,
}

impl FeedConfig {
    /// Create the production configuration.
    pub fn new() -> Self {
        Self {
            locale: Locale::dutch(),
            timezone: chrono_tz::Europe::Brussels,
            itunes: true,
            start_offset_ms: 1000,
            validate_ids: true,
            json_passthrough: true,
            language: "nl-be",
            owner: "VRT",
            copyright_holder: "VRT",
            categories: vec!["Music"],
            ttl_minutes: 60,
            generator: "radiopluscast",
        }
    }

    /// Disable the iTunes namespace tags.
    pub fn without_itunes(mut self) -> Self {
        self.itunes = false;
        self
    }

    /// Set the start-time offset in milliseconds.
    pub fn with_start_offset_ms(mut self, offset_ms: i64) -> Self {
        self.start_offset_ms = offset_ms;
        self
    }

    /// Disable programme-id validation on the HTTP surface.
    pub fn without_id_validation(mut self) -> Self {
        self.validate_ids = false;
        self
    }

    /// Disable the JSON passthrough query parameter.
    pub fn without_json_passthrough(mut self) -> Self {
        self.json_passthrough = false;
        self
    }

    /// Set the display time zone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new()
    }
}
