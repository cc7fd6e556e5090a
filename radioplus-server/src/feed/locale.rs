//! Localized names and description templates for feed rendering.
//!
//! Day and month name tables plus the templates the renderer fills in,
//! passed explicitly into rendering rather than held as process-wide
//! state, so concurrent requests can use different locales.

use chrono::{Datelike, Timelike};

/// Localized day/month names and description templates.
///
/// Templates use `{placeholder}` markers filled by the accessor methods:
/// the feed template takes `{programme}`, `{station}`,
/// `{station_description}` and `{programme_description}`; the episode
/// template takes `{programme}`, `{date}` and `{description}`.
#[derive(Debug, Clone)]
pub struct Locale {
    /// Full weekday names, Sunday first.
    pub weekdays: [&'static str; 7],

    /// Full month names, January first.
    pub months: [&'static str; 12],

    /// Feed-level description template. Ends with a space after the
    /// programme description; that space is part of the rendered text.
    pub feed_summary: &'static str,

    /// Per-episode description template.
    pub episode_summary: &'static str,
}

impl Locale {
    /// Dutch (Flanders) locale used for every production feed.
    pub fn dutch() -> Self {
        Self {
            weekdays: [
                "zondag",
                "maandag",
                "dinsdag",
                "woensdag",
                "donderdag",
                "vrijdag",
                "zaterdag",
            ],
            months: [
                "januari",
                "februari",
                "maart",
                "april",
                "mei",
                "juni",
                "juli",
                "augustus",
                "september",
                "oktober",
                "november",
                "december",
            ],
            feed_summary: "Herbeluister de meest recente afleveringen van {programme} op \
                           {station} - {station_description}. {programme_description} ",
            episode_summary: "Herbeluister {programme} van {date}. {description}",
        }
    }

    /// Weekday name for a date.
    pub fn weekday<T: Datelike>(&self, date: &T) -> &'static str {
        self.weekdays[date.weekday().num_days_from_sunday() as usize]
    }

    /// Month name for a date.
    pub fn month<T: Datelike>(&self, date: &T) -> &'static str {
        self.months[date.month0() as usize]
    }

    /// Date without year, e.g. "zondag 2 juni". Used in episode titles.
    pub fn day_label<T: Datelike>(&self, date: &T) -> String {
        format!("{} {} {}", self.weekday(date), date.day(), self.month(date))
    }

    /// Date with year, e.g. "zondag 2 juni 2019". Used in episode
    /// descriptions.
    pub fn date_label<T: Datelike>(&self, date: &T) -> String {
        format!(
            "{} {} {} {}",
            self.weekday(date),
            date.day(),
            self.month(date),
            date.year()
        )
    }

    /// 24-hour clock label, e.g. "18:03".
    pub fn time_label<T: Timelike>(&self, time: &T) -> String {
        format!("{:02}:{:02}", time.hour(), time.minute())
    }

    /// Fill the feed-level description template.
    pub fn feed_description(
        &self,
        programme: &str,
        station: &str,
        station_description: &str,
        programme_description: &str,
    ) -> String {
        self.feed_summary
            .replace("{programme}", programme)
            .replace("{station}", station)
            .replace("{station_description}", station_description)
            .replace("{programme_description}", programme_description)
    }

    /// Fill the per-episode description template.
    pub fn episode_description(&self, programme: &str, date: &str, description: &str) -> String {
        self.episode_summary
            .replace("{programme}", programme)
            .replace("{date}", date)
            .replace("{description}", description)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::dutch()
    }
}
