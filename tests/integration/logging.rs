//! The credential must never reach log output.

use std::io;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use chatkit_session::api::create_router;
use chatkit_session::startup;

use crate::support::{config_for, Behavior, FakeUpstream, TEST_API_KEY};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn post_session(behavior: Behavior) -> StatusCode {
    let upstream = FakeUpstream::start(behavior).await;
    let config = config_for(&upstream.base_url(), 200);
    let app = create_router(startup::build_state(&config).unwrap());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/chatkit/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    response.status()
}

// Current-thread runtime so the scoped subscriber sees every task.
#[tokio::test(flavor = "current_thread")]
async fn credential_never_logged() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("chatkit_session=trace,tower_http=trace,info"))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    assert_eq!(
        post_session(Behavior::Succeed("secret_123")).await,
        StatusCode::OK
    );
    assert_eq!(
        post_session(Behavior::FailEchoingKey(StatusCode::INTERNAL_SERVER_ERROR)).await,
        StatusCode::BAD_GATEWAY
    );
    assert_eq!(
        post_session(Behavior::FailEchoingKey(StatusCode::UNAUTHORIZED)).await,
        StatusCode::BAD_GATEWAY
    );
    assert_eq!(
        post_session(Behavior::Hang(std::time::Duration::from_secs(1))).await,
        StatusCode::GATEWAY_TIMEOUT
    );

    let output = logs.contents();
    assert!(output.contains("Session created"), "logs were not captured");
    assert!(output.contains("Session creation failed"));
    assert!(!output.contains(TEST_API_KEY));
}
