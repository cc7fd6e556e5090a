//! Web layer for the podcast feed server.
//!
//! Provides the feed endpoint and a health check.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
