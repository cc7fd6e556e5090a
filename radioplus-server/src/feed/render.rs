//! Podcast feed rendering.
//!
//! Turns a located station + programme pair into an RSS 2.0 channel with
//! iTunes podcast tags. Rendering is a pure function of its inputs: the
//! located data, the feed's own URL, the current instant, and the feed
//! configuration. Episode records are never modified; adjusted air times
//! live in derived [`Airing`] values.

use chrono::{DateTime, Datelike, Utc};
use rss::extension::atom::{AtomExtensionBuilder, Link};
use rss::extension::itunes::{
    ITunesChannelExtensionBuilder, ITunesItemExtensionBuilder, ITunesOwnerBuilder,
};
use rss::{
    CategoryBuilder, Channel, ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder, Item,
    ItemBuilder,
};

use crate::domain::{Airing, AiringError, ms_to_hms};
use crate::radioplus::{Episode, Located, Programme, StationInfo};

use super::config::FeedConfig;

/// MIME type of every episode enclosure.
const ENCLOSURE_TYPE: &str = "audio/mpeg";

/// MIME type advertised on the feed's self-link.
const FEED_TYPE: &str = "application/rss+xml";

/// RSS documentation URL embedded in the feed.
const DOCS_URL: &str = "https://www.rssboard.org/rss-specification";

/// Error during feed rendering.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    /// An episode carried timestamps that do not form a valid air time.
    #[error("episode {index}: {source}")]
    BadAirtime {
        index: usize,
        #[source]
        source: AiringError,
    },
}

/// Render a podcast feed for a located programme.
///
/// `feed_url` is the fully-qualified URL of the request producing this
/// feed and becomes the channel's self-link. `now` stamps the channel's
/// publication dates and copyright year.
pub fn render(
    located: &Located,
    feed_url: &str,
    now: DateTime<Utc>,
    config: &FeedConfig,
) -> Result<Channel, RenderError> {
    let station = &located.station;
    let programme = &located.programme;

    let description = config.locale.feed_description(
        &programme.name,
        &station.name,
        &station.description,
        &programme.description,
    );

    let items = programme
        .items
        .iter()
        .enumerate()
        .map(|(index, episode)| build_item(episode, index, station, programme, config))
        .collect::<Result<Vec<_>, _>>()?;

    let categories = config
        .categories
        .iter()
        .map(|name| CategoryBuilder::default().name(*name).build())
        .collect::<Vec<_>>();

    let image = ImageBuilder::default()
        .url(programme.image.clone())
        .title(programme.name.clone())
        .link(station.website.clone())
        .build();

    let self_link = Link {
        href: feed_url.to_string(),
        rel: "self".to_string(),
        mime_type: Some(FEED_TYPE.to_string()),
        ..Link::default()
    };

    let itunes = config.itunes.then(|| {
        let owner = ITunesOwnerBuilder::default()
            .name(Some(config.owner.to_string()))
            .build();

        ITunesChannelExtensionBuilder::default()
            .author(Some(station.name.clone()))
            .subtitle(Some(programme.description.clone()))
            .summary(Some(description.clone()))
            .owner(Some(owner))
            .image(Some(programme.image.clone()))
            .build()
    });

    // Copyright year follows the display time zone, not UTC.
    let year = now.with_timezone(&config.timezone).year();

    Ok(ChannelBuilder::default()
        .title(programme.name.clone())
        .link(station.website.clone())
        .description(description)
        .image(Some(image))
        .language(Some(config.language.to_string()))
        .categories(categories)
        .ttl(Some(config.ttl_minutes.to_string()))
        .generator(Some(config.generator.to_string()))
        .docs(Some(DOCS_URL.to_string()))
        .copyright(Some(format!("{} © {year}", config.copyright_holder)))
        .pub_date(Some(now.to_rfc2822()))
        .last_build_date(Some(now.to_rfc2822()))
        .atom_ext(Some(
            AtomExtensionBuilder::default().links(vec![self_link]).build(),
        ))
        .itunes_ext(itunes)
        .items(items)
        .build())
}

/// Build one feed item from an episode.
fn build_item(
    episode: &Episode,
    index: usize,
    station: &StationInfo,
    programme: &Programme,
    config: &FeedConfig,
) -> Result<Item, RenderError> {
    let airing = Airing::from_millis(episode.start_time, episode.duration, config.start_offset_ms)
        .map_err(|source| RenderError::BadAirtime { index, source })?;

    let start = airing.start().with_timezone(&config.timezone);
    let end = airing.end().with_timezone(&config.timezone);

    let title = format!(
        "{}, {} - {}",
        config.locale.day_label(&start),
        config.locale.time_label(&start),
        config.locale.time_label(&end),
    );

    let description = config.locale.episode_description(
        &programme.name,
        &config.locale.date_label(&start),
        &episode.description,
    );

    let duration = ms_to_hms(episode.duration);

    // The length attribute carries the episode duration in milliseconds
    // rather than a byte count. Podcast clients consuming these feeds
    // expect that, so it is preserved.
    let enclosure = EnclosureBuilder::default()
        .url(episode.stream.clone())
        .mime_type(ENCLOSURE_TYPE)
        .length(episode.duration.to_string())
        .build();

    let guid = GuidBuilder::default()
        .value(episode.stream.clone())
        .permalink(true)
        .build();

    let itunes = config.itunes.then(|| {
        ITunesItemExtensionBuilder::default()
            .author(Some(station.name.clone()))
            .duration(Some(duration))
            .summary(Some(description.clone()))
            .build()
    });

    Ok(ItemBuilder::default()
        .title(Some(title))
        .link(Some(episode.stream.clone()))
        .description(Some(description))
        .guid(Some(guid))
        .pub_date(Some(start.to_rfc2822()))
        .enclosure(Some(enclosure))
        .itunes_ext(itunes)
        .build())
}
