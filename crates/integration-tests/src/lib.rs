//! Integration tests for the PMS admin tools.
//!
//! The tests run the real [`PmsClient`](pms_admin::PmsClient) against
//! [`StubBackend`], an in-process axum server that records every request
//! and answers from per-path queues.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pms-admin-integration-tests
//! ```

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use pms_admin::AdminConfig;
use secrecy::SecretString;
use serde_json::Value;
use tokio::task::JoinHandle;
use url::Url;

/// Token the stub's clients are configured with.
pub const TEST_TOKEN: &str = "integration-test-token";

/// One request received by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    /// Parsed JSON body; `None` for an empty or non-JSON body.
    pub body: Option<Value>,
}

struct StubResponse {
    status: StatusCode,
    body: String,
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<String, VecDeque<StubResponse>>>>,
}

/// In-process PMS backend.
///
/// Unqueued paths answer 404 with an `error` message. The server stops
/// when the stub is dropped.
pub struct StubBackend {
    addr: SocketAddr,
    state: StubState,
    handle: JoinHandle<()>,
}

impl StubBackend {
    /// Bind to an ephemeral local port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn start() -> Self {
        let state = StubState::default();
        let app = Router::new()
            .fallback(handle_request)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener
            .local_addr()
            .expect("Stub backend has no local address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// `http://127.0.0.1:<port>`
    ///
    /// # Panics
    ///
    /// Never in practice; the address always forms a valid URL.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Invalid stub URL")
    }

    /// Client configuration pointing at the stub.
    #[must_use]
    pub fn config(&self) -> AdminConfig {
        AdminConfig::new(self.base_url(), SecretString::from(TEST_TOKEN))
    }

    /// Queue a response for the next request to `path`.
    pub fn respond(&self, path: &str, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(path.to_string())
            .or_default()
            .push_back(StubResponse {
                status,
                body: body.into(),
            });
    }

    /// Queue a JSON response for the next request to `path`.
    pub fn respond_json(&self, path: &str, status: u16, body: &Value) {
        self.respond(path, status, body.to_string());
    }

    /// Requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_request(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();

    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method,
            path: path.clone(),
            query: uri.query().map(str::to_string),
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: serde_json::from_str(&body).ok(),
        });

    let queued = state
        .responses
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_mut(&path)
        .and_then(VecDeque::pop_front);

    let (status, body) = queued.map_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                format!(r#"{{"error":"no stub for {path}"}}"#),
            )
        },
        |r| (r.status, r.body),
    );

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
