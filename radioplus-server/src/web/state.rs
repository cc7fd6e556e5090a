//! Application state for the web layer.

use std::sync::Arc;

use crate::feed::FeedConfig;
use crate::radioplus::RadioplusClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Radioplus state client
    pub radioplus: Arc<RadioplusClient>,

    /// Feed rendering configuration
    pub config: Arc<FeedConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(radioplus: RadioplusClient, config: FeedConfig) -> Self {
        Self {
            radioplus: Arc::new(radioplus),
            config: Arc::new(config),
        }
    }
}
