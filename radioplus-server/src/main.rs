use std::net::SocketAddr;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use radioplus_server::feed::FeedConfig;
use radioplus_server::radioplus::{RadioplusClient, RadioplusConfig};
use radioplus_server::web::{AppState, create_router};

/// Port used when the PORT environment variable is absent or unusable.
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "radioplus_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    // The state URL override exists for testing against a fixture server.
    let mut radioplus_config = RadioplusConfig::new();
    if let Ok(url) = std::env::var("RADIOPLUS_STATE_URL") {
        radioplus_config = radioplus_config.with_state_url(url);
    }

    let radioplus =
        RadioplusClient::new(radioplus_config).expect("Failed to create Radioplus client");

    let state = AppState::new(radioplus, FeedConfig::default());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    tracing::info!("Radiopluscast listening on http://{addr}");
    tracing::info!("Feeds at GET /<programme-uuid>, health at GET /health");

    axum::serve(listener, app).await.unwrap();
}
