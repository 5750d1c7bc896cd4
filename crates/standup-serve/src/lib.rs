//! HTTP transport: GitHub webhook intake and the daily summary trigger.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use standup_core::{classify, Classification, WebHook, Zone};
use standup_digest::compose;
use standup_store::{record_or_log, ActivityStore, StoreError};

/// Header carrying the GitHub event name.
const EVENT_HEADER: &str = "X-GitHub-Event";

// ── Config ──

pub struct ServeConfig {
    pub bind: String,
    pub port: u16,
}

/// Process configuration, constructed explicitly by the caller.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub timezone: String,
    pub slack_webhook_url: Option<String>,
}

// ── App State ──

struct AppState {
    db_path: PathBuf,
    zone: Zone,
    slack_webhook_url: Option<String>,
}

impl AppState {
    fn open_store(&self) -> Result<ActivityStore, StoreError> {
        ActivityStore::open_or_create(&self.db_path)
    }
}

// ── Error Handling ──

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ── Entrypoint ──

pub async fn serve(config: AppConfig, serve_config: ServeConfig) -> anyhow::Result<()> {
    let app = router(config);
    let addr = format!("{}:{}", serve_config.bind, serve_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("standup HTTP server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router (for testing without binding to a port).
pub fn router(config: AppConfig) -> Router {
    let state = Arc::new(AppState {
        zone: Zone::resolve(&config.timezone),
        db_path: config.db_path,
        slack_webhook_url: config.slack_webhook_url,
    });
    Router::new()
        .route("/", post(receive_event))
        // The upstream cron hits the trailing-slash spelling; accept both.
        .route("/tasks/summary", get(run_summary))
        .route("/tasks/summary/", get(run_summary))
        .route("/api/health", get(health))
        .with_state(state)
}

// ── Health ──

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

// ── POST / (webhook intake) ──

/// Webhook intake. Always answers `ok`: once the transport has the
/// payload, parse misses, unrecognized events, and store failures are
/// the receiver's problem, never the sender's.
async fn receive_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> &'static str {
    let event_name = headers
        .get(EVENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let webhook: WebHook = match serde_json::from_slice(&body) {
        Ok(webhook) => webhook,
        Err(err) => {
            tracing::debug!(event_name, error = %err, "unparseable webhook body; ignoring");
            return "ok";
        }
    };

    match classify(event_name, &webhook) {
        Classification::Activity(activity) => match state.open_store() {
            Ok(store) => record_or_log(&store, &state.zone, &activity),
            Err(err) => {
                tracing::warn!(error = %err, "activity store unavailable; dropping event");
            }
        },
        Classification::Reserved | Classification::Unrecognized => {}
    }
    "ok"
}

// ── GET /tasks/summary ──

#[derive(Serialize)]
struct SummaryResponse {
    date: String,
    delivered: bool,
    failed_categories: Vec<&'static str>,
}

/// Summary trigger. Aggregation failures degrade the digest to the
/// surviving categories and turn the response into a 500, but the
/// report is still composed and still handed to delivery.
async fn run_summary(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let store = state.open_store()?;
    let date = state.zone.today();
    let outcome = compose(&store, &date);

    let delivered = match &state.slack_webhook_url {
        Some(url) => match standup_notify::post(url, &outcome.report) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "digest delivery failed");
                false
            }
        },
        None => {
            tracing::warn!("no Slack webhook configured; digest not delivered");
            false
        }
    };

    let status = if outcome.failures.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let body = SummaryResponse {
        date,
        delivered,
        failed_categories: outcome.failed_categories(),
    };
    Ok((status, Json(body)).into_response())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use standup_core::Category;
    use std::path::Path;
    use tower::ServiceExt;

    fn test_router(dir: &Path) -> Router {
        router(AppConfig {
            db_path: dir.join("standup.db"),
            timezone: "Asia/Tokyo".to_string(),
            slack_webhook_url: None,
        })
    }

    fn webhook_request(event_name: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(EVENT_HEADER, event_name)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());

        let resp = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn issue_opened_event_is_recorded() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());

        let resp = app
            .oneshot(webhook_request(
                "issues",
                serde_json::json!({
                    "action": "opened",
                    "issue": {"url": "https://x/1"},
                    "sender": {"login": "alice"}
                }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "ok");

        let store = ActivityStore::open_or_create(&tmp.path().join("standup.db")).unwrap();
        let today = Zone::resolve("Asia/Tokyo").today();
        let records = store.query_by_date(Category::IssueOpened, &today).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user, "alice");
        assert_eq!(records[0].url, "https://x/1");
    }

    #[tokio::test]
    async fn unrecognized_event_answers_ok_and_records_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());

        let resp = app
            .oneshot(webhook_request(
                "watch",
                serde_json::json!({"action": "started", "sender": {"login": "alice"}}),
            ))
            .await
            .unwrap();

        assert_eq!(body_string(resp).await, "ok");

        let store = ActivityStore::open_or_create(&tmp.path().join("standup.db")).unwrap();
        let today = Zone::resolve("Asia/Tokyo").today();
        for category in Category::ALL {
            assert!(store.query_by_date(category, &today).unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn assigned_action_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());

        let resp = app
            .oneshot(webhook_request(
                "issues",
                serde_json::json!({
                    "action": "assigned",
                    "issue": {"url": "https://x/1"},
                    "sender": {"login": "alice"}
                }),
            ))
            .await
            .unwrap();

        assert_eq!(body_string(resp).await, "ok");

        let store = ActivityStore::open_or_create(&tmp.path().join("standup.db")).unwrap();
        let today = Zone::resolve("Asia/Tokyo").today();
        assert!(store.query_by_date(Category::IssueOpened, &today).unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_still_answers_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(EVENT_HEADER, "issues")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "ok");
    }

    #[tokio::test]
    async fn summary_reports_date_and_undelivered_without_webhook_url() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_router(tmp.path());

        let resp = app
            .oneshot(Request::builder().uri("/tasks/summary").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(json["date"], Zone::resolve("Asia/Tokyo").today());
        assert_eq!(json["delivered"], false);
        assert_eq!(json["failed_categories"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn summary_surfaces_partial_failure_as_500() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("standup.db");
        // Replace one table with a stub lacking the queried columns.
        // Schema creation skips it (IF NOT EXISTS), so the sabotage
        // survives the per-request open and the SELECT fails.
        drop(ActivityStore::open_or_create(&db_path).unwrap());
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "DROP TABLE pull_request_open;
             CREATE TABLE pull_request_open (id INTEGER PRIMARY KEY, date TEXT NOT NULL);",
        )
        .unwrap();
        drop(conn);

        let app = test_router(tmp.path());
        let resp = app
            .oneshot(Request::builder().uri("/tasks/summary").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(json["failed_categories"][0], "pull_request_open");
    }
}
