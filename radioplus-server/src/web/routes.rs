//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Host, OriginalUri, Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use rss::Channel;
use tower_http::trace::TraceLayer;

use crate::domain::ProgrammeId;
use crate::feed::render;
use crate::radioplus::RadioplusError;

use super::dto::*;
use super::state::AppState;

/// Content type of rendered feeds.
const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=UTF-8";

/// Outward message for a malformed programme id.
const MALFORMED_ID_MESSAGE: &str = "The programme UUID is malformatted";

/// Outward message for a well-formed id absent from upstream.
const UNKNOWN_ID_MESSAGE: &str = "The programme UUID does not exist";

/// Outward message when upstream cannot be fetched or parsed.
const UPSTREAM_MESSAGE: &str = "The Radioplus state endpoint could not be reached";

/// Outward message when feed construction fails.
const RENDER_MESSAGE: &str = "Feed rendering failed";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/:programme_id", get(feed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Serve the podcast feed for one programme.
///
/// Validates the id, locates the programme in a fresh upstream snapshot,
/// and renders it as RSS, or as the JSON passthrough when requested.
async fn feed(
    State(state): State<AppState>,
    Host(host): Host,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Path(programme_id): Path<String>,
    Query(query): Query<FeedQuery>,
) -> Result<Response, AppError> {
    if state.config.validate_ids && ProgrammeId::parse(&programme_id).is_err() {
        return Err(AppError::BadRequest);
    }

    let located = state
        .radioplus
        .locate(&programme_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if state.config.json_passthrough && wants_json(&query) {
        return Ok(Json(PassthroughBody {
            status: 200,
            error: "OK".to_string(),
            data: located,
        })
        .into_response());
    }

    let feed_url = request_url(&headers, &host, &uri);
    let channel = render(&located, &feed_url, Utc::now(), &state.config).map_err(|e| {
        AppError::Internal {
            message: e.to_string(),
        }
    })?;

    Ok(Rss(channel).into_response())
}

/// Check whether the request selected the JSON passthrough.
fn wants_json(query: &FeedQuery) -> bool {
    query
        .format
        .as_deref()
        .is_some_and(|format| format.eq_ignore_ascii_case("json"))
}

/// Reconstruct the fully-qualified URL of the current request.
///
/// The scheme comes from `X-Forwarded-Proto` when a reverse proxy sets it,
/// falling back to plain `http`. Host and path come from the request line,
/// query string included.
fn request_url(headers: &HeaderMap, host: &str, uri: &Uri) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    format!("{scheme}://{host}{uri}")
}

/// RSS response wrapper that sets the feed content type.
struct Rss(Channel);

impl IntoResponse for Rss {
    fn into_response(self) -> Response {
        (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(RSS_CONTENT_TYPE),
            )],
            self.0.to_string(),
        )
            .into_response()
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed programme id.
    BadRequest,
    /// Well-formed id with no matching programme upstream.
    NotFound,
    /// Upstream fetch or parse failure.
    RemoteUnavailable { message: String },
    /// Feed construction failure.
    Internal { message: String },
}

impl From<RadioplusError> for AppError {
    fn from(e: RadioplusError) -> Self {
        AppError::RemoteUnavailable {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest => (StatusCode::BAD_REQUEST, MALFORMED_ID_MESSAGE.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, UNKNOWN_ID_MESSAGE.to_string()),
            AppError::RemoteUnavailable { message } => {
                tracing::warn!("upstream unavailable: {message}");
                (StatusCode::BAD_GATEWAY, UPSTREAM_MESSAGE.to_string())
            }
            AppError::Internal { message } => {
                tracing::error!("feed rendering failed: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, RENDER_MESSAGE.to_string())
            }
        };

        let body = Json(ErrorBody {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("").to_string(),
            message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::feed::FeedConfig;
    use crate::radioplus::{RadioplusClient, RadioplusConfig};

    /// Upstream snapshot matching the station and programme fixtures used
    /// throughout the feed tests.
    const SNAPSHOT: &str = r#"[
        {
            "channel": {"info": {"name": "Radio1", "website": "https://radio1.be", "description": "desc"}},
            "data": {"ondemandnew": [
                {
                    "collectionID": "11111111-1111-4111-8111-111111111111",
                    "name": "Show",
                    "description": "about",
                    "image": "https://img.example/show.png",
                    "items": [
                        {
                            "startTime": 1700000000000,
                            "duration": 3600000,
                            "stream": "https://x/a.mp3",
                            "description": "ep1",
                            "title": "Ep 1"
                        }
                    ]
                },
                {
                    "collectionID": "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa",
                    "name": "Nacht",
                    "description": "na middernacht",
                    "image": "https://img.example/nacht.png",
                    "items": []
                }
            ]}
        }
    ]"#;

    const PROGRAMME_ID: &str = "11111111-1111-4111-8111-111111111111";

    /// Snapshot where a second station carries an episode record missing
    /// its start time.
    const SNAPSHOT_WITH_BROKEN_EPISODE: &str = r#"[
        {
            "channel": {"info": {"name": "Radio1", "website": "https://radio1.be", "description": "desc"}},
            "data": {"ondemandnew": [
                {
                    "collectionID": "11111111-1111-4111-8111-111111111111",
                    "name": "Show",
                    "description": "about",
                    "image": "https://img.example/show.png",
                    "items": [
                        {
                            "startTime": 1700000000000,
                            "duration": 3600000,
                            "stream": "https://x/a.mp3",
                            "description": "ep1",
                            "title": "Ep 1"
                        }
                    ]
                }
            ]}
        },
        {
            "channel": {"info": {"name": "Radio2", "website": "https://radio2.be", "description": "desc2"}},
            "data": {"ondemandnew": [
                {
                    "collectionID": "22222222-2222-4222-8222-222222222222",
                    "name": "Kapot",
                    "description": "",
                    "image": "",
                    "items": [{"duration": 60000, "stream": "https://x/b.mp3"}]
                }
            ]}
        }
    ]"#;

    /// Snapshot whose only episode carries a start time outside the
    /// representable range.
    const SNAPSHOT_UNRENDERABLE: &str = r#"[
        {
            "channel": {"info": {"name": "Radio1", "website": "https://radio1.be", "description": "desc"}},
            "data": {"ondemandnew": [
                {
                    "collectionID": "11111111-1111-4111-8111-111111111111",
                    "name": "Show",
                    "description": "about",
                    "image": "",
                    "items": [
                        {"startTime": 9223372036854775807, "duration": 1000, "stream": "https://x/a.mp3"}
                    ]
                }
            ]}
        }
    ]"#;

    /// Second fixture programme; its id contains hex letters, so casing
    /// matters.
    const LETTERED_ID: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa";

    /// Serve a fixed response from an ephemeral local port.
    async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/", get(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    /// Bind the application against the given upstream URL and return its
    /// base URL.
    async fn spawn_app_with(state_url: String, config: FeedConfig) -> String {
        let client =
            RadioplusClient::new(RadioplusConfig::new().with_state_url(state_url)).unwrap();
        let app = create_router(AppState::new(client, config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn spawn_app(state_url: String) -> String {
        spawn_app_with(state_url, FeedConfig::default()).await
    }

    #[tokio::test]
    async fn health_endpoint() {
        let base = spawn_app("http://127.0.0.1:1/".to_string()).await;

        let response = reqwest::get(format!("{base}/health")).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn malformed_id_is_rejected_before_upstream() {
        // Upstream is unreachable; a 400 proves validation short-circuits.
        let base = spawn_app("http://127.0.0.1:1/".to_string()).await;

        let response = reqwest::get(format!("{base}/not-a-uuid")).await.unwrap();
        assert_eq!(response.status(), 400);

        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message, "The programme UUID is malformatted");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT).await;
        let base = spawn_app(upstream).await;

        let response = reqwest::get(format!(
            "{base}/99999999-9999-4999-8999-999999999999"
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), 404);

        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.message, "The programme UUID does not exist");
    }

    #[tokio::test]
    async fn feed_round_trip() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT).await;
        let base = spawn_app(upstream).await;

        let response = reqwest::get(format!("{base}/{PROGRAMME_ID}")).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/rss+xml; charset=UTF-8")
        );

        let xml = response.text().await.unwrap();
        assert!(xml.contains("<title>Show</title>"));
        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.contains("https://x/a.mp3"));
        assert!(xml.contains("1:00:00"));
    }

    #[tokio::test]
    async fn self_link_is_the_request_url() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT).await;
        let base = spawn_app(upstream).await;

        let url = format!("{base}/{PROGRAMME_ID}");
        let xml = reqwest::get(&url).await.unwrap().text().await.unwrap();

        assert!(xml.contains(&url));
    }

    #[tokio::test]
    async fn json_passthrough_returns_located_data() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT).await;
        let base = spawn_app(upstream).await;

        let response = reqwest::get(format!("{base}/{PROGRAMME_ID}?format=json"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], 200);
        assert_eq!(body["error"], "OK");
        assert_eq!(body["data"]["station"]["name"], "Radio1");
        assert_eq!(body["data"]["programme"]["name"], "Show");
        assert_eq!(body["data"]["programme"]["items"][0]["startTime"], 1_700_000_000_000_i64);
    }

    #[tokio::test]
    async fn passthrough_format_is_case_insensitive() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT).await;
        let base = spawn_app(upstream).await;

        let response = reqwest::get(format!("{base}/{PROGRAMME_ID}?format=JSON"))
            .await
            .unwrap();

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "OK");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_bad_gateway() {
        let base = spawn_app("http://127.0.0.1:1/".to_string()).await;

        let response = reqwest::get(format!("{base}/{PROGRAMME_ID}")).await.unwrap();
        assert_eq!(response.status(), 502);

        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.status, 502);
        assert_eq!(body.error, "Bad Gateway");
    }

    #[tokio::test]
    async fn upstream_server_error_is_bad_gateway() {
        let upstream = spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
        let base = spawn_app(upstream).await;

        let response = reqwest::get(format!("{base}/{PROGRAMME_ID}")).await.unwrap();

        assert_eq!(response.status(), 502);
    }

    #[tokio::test]
    async fn unparsable_upstream_is_bad_gateway() {
        let upstream = spawn_upstream(StatusCode::OK, "<html>maintenance</html>").await;
        let base = spawn_app(upstream).await;

        let response = reqwest::get(format!("{base}/{PROGRAMME_ID}")).await.unwrap();

        assert_eq!(response.status(), 502);
    }

    #[tokio::test]
    async fn broken_episode_elsewhere_does_not_block_other_feeds() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT_WITH_BROKEN_EPISODE).await;
        let base = spawn_app(upstream).await;

        let response = reqwest::get(format!("{base}/{PROGRAMME_ID}")).await.unwrap();
        assert_eq!(response.status(), 200);

        let xml = response.text().await.unwrap();
        assert!(xml.contains("<title>Show</title>"));
        assert_eq!(xml.matches("<item>").count(), 1);
    }

    #[tokio::test]
    async fn broken_episode_is_dropped_from_its_own_feed() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT_WITH_BROKEN_EPISODE).await;
        let base = spawn_app(upstream).await;

        let response = reqwest::get(format!(
            "{base}/22222222-2222-4222-8222-222222222222"
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), 200);

        let xml = response.text().await.unwrap();
        assert!(xml.contains("<title>Kapot</title>"));
        assert_eq!(xml.matches("<item>").count(), 0);
    }

    #[tokio::test]
    async fn unrenderable_timestamp_is_internal_error_with_fixed_message() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT_UNRENDERABLE).await;
        let base = spawn_app(upstream).await;

        let response = reqwest::get(format!("{base}/{PROGRAMME_ID}")).await.unwrap();
        assert_eq!(response.status(), 500);

        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.status, 500);
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, "Feed rendering failed");
    }

    #[tokio::test]
    async fn passthrough_can_be_disabled() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT).await;
        let base =
            spawn_app_with(upstream, FeedConfig::default().without_json_passthrough()).await;

        let response = reqwest::get(format!("{base}/{PROGRAMME_ID}?format=json"))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/rss+xml; charset=UTF-8")
        );
    }

    #[tokio::test]
    async fn validation_can_be_disabled() {
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT).await;
        let base = spawn_app_with(upstream, FeedConfig::default().without_id_validation()).await;

        // A non-UUID id now reaches upstream and misses.
        let response = reqwest::get(format!("{base}/not-a-uuid")).await.unwrap();

        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn upper_case_id_is_well_formed_but_unknown() {
        // Validation accepts any casing; the upstream comparison is exact,
        // so an upper-cased variant of a known lower-case id misses.
        let upstream = spawn_upstream(StatusCode::OK, SNAPSHOT).await;
        let base = spawn_app(upstream).await;

        let exact = reqwest::get(format!("{base}/{LETTERED_ID}")).await.unwrap();
        assert_eq!(exact.status(), 200);

        let url = format!("{base}/{}", LETTERED_ID.to_uppercase());
        let upper = reqwest::get(url).await.unwrap();
        assert_eq!(upper.status(), 404);
    }
}
