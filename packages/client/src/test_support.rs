//! Loopback mock server shared by the client tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::config::ClientConfig;
use crate::credentials::Credentials;

/// Path prefix the mock server mounts the API under.
pub const API_PREFIX: &str = "/voyager/api";

pub async fn spawn_mock_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}{API_PREFIX}")
}

pub fn test_credentials() -> Credentials {
    Credentials::new("AQEDtest", "ajax:123")
}

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::default().with_base_url(base_url)
}

/// One request as the mock server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path below [`API_PREFIX`], without a leading slash.
    pub path: String,
    /// The raw query string, exactly as sent.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    /// The single value of `name`, or `""` when absent. Panics when the
    /// header was sent more than once.
    pub fn header(&self, name: &str) -> &str {
        let values = self.header_values(name);
        assert!(values.len() <= 1, "{name} sent {} times: {values:?}", values.len());
        values.first().copied().unwrap_or_default()
    }

    /// Every value sent for `name`, in order.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    /// The only request received; panics unless exactly one arrived.
    pub fn single(&self) -> Recorded {
        let all = self.requests();
        assert_eq!(all.len(), 1, "expected one request, got {all:?}");
        all.into_iter().next().unwrap()
    }
}

#[derive(Clone)]
struct MockState {
    recorder: Recorder,
    replies: Arc<HashMap<String, Value>>,
}

async fn respond(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .trim_start_matches('/')
        .to_string();

    state.recorder.0.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    match state.replies.get(&path) {
        Some(Value::Null) => StatusCode::OK.into_response(),
        Some(reply) => Json(reply.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serve `replies` (path below the API prefix → JSON body; `Null` for an
/// empty 200) and record every request.
pub async fn mock_voyager(replies: &[(&str, Value)]) -> (String, Recorder) {
    let recorder = Recorder::default();
    let state = MockState {
        recorder: recorder.clone(),
        replies: Arc::new(
            replies
                .iter()
                .map(|(path, reply)| (path.trim_start_matches('/').to_string(), reply.clone()))
                .collect(),
        ),
    };
    let app = Router::new().fallback(respond).with_state(state);
    (spawn_mock_server(app).await, recorder)
}
