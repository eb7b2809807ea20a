//! Shared test fixtures: an in-process fake of the upstream sessions API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use chatkit_session::config::Config;

pub const TEST_API_KEY: &str = "sk-test-do-not-leak-8f3a91";

/// How the fake upstream answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// 200 with the given client secret.
    Succeed(&'static str),
    /// Given status, body echoing the bearer token the way some APIs do.
    FailEchoingKey(StatusCode),
    /// 200 with a body that is not a session.
    Malformed,
    /// Sleep before answering.
    Hang(Duration),
}

/// A request as seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct Captured {
    pub authorization: Option<String>,
    pub beta: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    behavior: Behavior,
    captured: Arc<Mutex<Vec<Captured>>>,
}

pub struct FakeUpstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl FakeUpstream {
    pub async fn start(behavior: Behavior) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            behavior,
            captured: captured.clone(),
        };

        let app = Router::new()
            .route("/v1/chatkit/sessions", post(fake_sessions))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, captured }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn fake_sessions(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let authorization = header("authorization");
    state.captured.lock().unwrap().push(Captured {
        authorization: authorization.clone(),
        beta: header("openai-beta"),
        body,
    });

    match state.behavior {
        Behavior::Succeed(secret) => Json(json!({
            "id": "cksess_test",
            "object": "chatkit.session",
            "client_secret": secret,
            "expires_at": 1_900_000_000
        }))
        .into_response(),
        Behavior::FailEchoingKey(status) => (
            status,
            Json(json!({
                "error": {
                    "message": format!("Problem with key {}", authorization.unwrap_or_default()),
                    "type": "server_error"
                }
            })),
        )
            .into_response(),
        Behavior::Malformed => Json(json!({ "id": "cksess_test" })).into_response(),
        Behavior::Hang(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "client_secret": "too_late" })).into_response()
        }
    }
}

/// Config pointing at the given upstream with the test key.
pub fn config_for(base_url: &str, timeout_ms: u64) -> Config {
    Config::from_vars(vec![
        ("OPENAI_API_KEY".to_string(), TEST_API_KEY.to_string()),
        ("OPENAI_BASE_URL".to_string(), base_url.to_string()),
        ("UPSTREAM_TIMEOUT_MS".to_string(), timeout_ms.to_string()),
        ("BIND_HOST".to_string(), "127.0.0.1".to_string()),
        ("PORT".to_string(), "0".to_string()),
    ])
    .unwrap()
}
