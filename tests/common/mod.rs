// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: a fake upstream server and app builders.
//!
//! The fake serves all three upstream APIs from one ephemeral port:
//! `POST /auth/login`, `GET /pollution` and `GET /summary/{topic}`.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use pollution_cities::config::Config;
use pollution_cities::routes::create_router;
use pollution_cities::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Token the fake identity upstream hands out and the fake pollution upstream accepts.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-bearer-token";

/// How the fake upstream behaves.
#[derive(Clone)]
pub struct UpstreamBehavior {
    pub login_status: StatusCode,
    pub login_delay: Duration,
    pub pollution_status: StatusCode,
    /// Page reported in `meta.page`; `None` echoes the requested page.
    pub reported_page: Option<Value>,
    /// Leave `meta` out of the pollution body entirely.
    pub omit_meta: bool,
    pub results: Value,
    /// Topic → extract. Unknown topics get a 404.
    pub summaries: HashMap<String, String>,
}

impl Default for UpstreamBehavior {
    fn default() -> Self {
        Self {
            login_status: StatusCode::OK,
            login_delay: Duration::ZERO,
            pollution_status: StatusCode::OK,
            reported_page: None,
            omit_meta: false,
            results: json!([]),
            summaries: HashMap::new(),
        }
    }
}

#[derive(Default)]
struct Recorded {
    login_calls: AtomicUsize,
    pollution_calls: AtomicUsize,
    summary_calls: AtomicUsize,
    pollution_queries: Mutex<Vec<HashMap<String, String>>>,
    summary_topics: Mutex<Vec<String>>,
}

struct Shared {
    behavior: UpstreamBehavior,
    recorded: Recorded,
}

/// A running fake upstream.
pub struct FakeUpstream {
    pub base_url: String,
    shared: Arc<Shared>,
}

#[allow(dead_code)]
impl FakeUpstream {
    pub async fn start(behavior: UpstreamBehavior) -> Self {
        let shared = Arc::new(Shared {
            behavior,
            recorded: Recorded::default(),
        });

        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/pollution", get(pollution))
            .route("/summary/{topic}", get(summary))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            shared,
        }
    }

    pub fn summary_url(&self) -> String {
        format!("{}/summary", self.base_url)
    }

    /// App config pointing at this fake.
    pub fn config(&self) -> Config {
        Config {
            pollution_api_url: self.base_url.clone(),
            summary_api_url: self.summary_url(),
            ..Config::test_default()
        }
    }

    pub fn login_calls(&self) -> usize {
        self.shared.recorded.login_calls.load(Ordering::SeqCst)
    }

    pub fn pollution_calls(&self) -> usize {
        self.shared.recorded.pollution_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> usize {
        self.shared.recorded.summary_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.login_calls() + self.pollution_calls() + self.summary_calls()
    }

    pub fn pollution_queries(&self) -> Vec<HashMap<String, String>> {
        self.shared.recorded.pollution_queries.lock().unwrap().clone()
    }

    pub fn summary_topics(&self) -> Vec<String> {
        self.shared.recorded.summary_topics.lock().unwrap().clone()
    }
}

async fn login(State(shared): State<Arc<Shared>>, Json(body): Json<Value>) -> Response {
    shared.recorded.login_calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(shared.behavior.login_delay).await;

    let valid = body["username"] == "testuser" && body["password"] == "testpass";
    if !valid {
        return (StatusCode::UNAUTHORIZED, "bad credentials").into_response();
    }
    if !shared.behavior.login_status.is_success() {
        return (shared.behavior.login_status, "login unavailable").into_response();
    }

    Json(json!({ "token": TEST_TOKEN })).into_response()
}

async fn pollution(
    State(shared): State<Arc<Shared>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    shared.recorded.pollution_calls.fetch_add(1, Ordering::SeqCst);
    shared
        .recorded
        .pollution_queries
        .lock()
        .unwrap()
        .push(query.clone());

    let expected = format!("Bearer {}", TEST_TOKEN);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|h| h == expected)
        .unwrap_or(false);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "missing bearer token").into_response();
    }

    if !shared.behavior.pollution_status.is_success() {
        return (shared.behavior.pollution_status, "pollution unavailable").into_response();
    }

    if shared.behavior.omit_meta {
        return Json(json!({ "results": shared.behavior.results })).into_response();
    }

    let page = shared.behavior.reported_page.clone().unwrap_or_else(|| {
        json!(query
            .get("page")
            .and_then(|p| p.parse::<u32>().ok())
            .unwrap_or(1))
    });

    Json(json!({
        "meta": { "page": page },
        "results": shared.behavior.results,
    }))
    .into_response()
}

async fn summary(State(shared): State<Arc<Shared>>, Path(topic): Path<String>) -> Response {
    shared.recorded.summary_calls.fetch_add(1, Ordering::SeqCst);
    shared
        .recorded
        .summary_topics
        .lock()
        .unwrap()
        .push(topic.clone());

    match shared.behavior.summaries.get(&topic) {
        Some(extract) => Json(json!({ "title": topic, "extract": extract })).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "title": "Not found." }))).into_response(),
    }
}

/// Create a test app from `config`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    (create_router(state.clone()), state)
}

/// `Authorization` header value for Basic credentials.
#[allow(dead_code)]
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", username, password)))
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
