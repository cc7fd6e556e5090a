//! Podcast feed construction.
//!
//! One renderer serves every feed variant. The differences between
//! variants live in [`FeedConfig`]: locale tables and templates, the
//! display time zone, iTunes tag emission, id validation, JSON
//! passthrough, and the start-time adjustment.

mod config;
mod locale;
mod render;

pub use config::FeedConfig;
pub use locale::Locale;
pub use render::{RenderError, render};
