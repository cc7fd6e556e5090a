//! Radioplus podcast feed server.
//!
//! A web application that turns a Radioplus on-demand programme into a
//! podcast RSS feed, one feed per programme id.

pub mod domain;
pub mod feed;
pub mod radioplus;
pub mod web;
