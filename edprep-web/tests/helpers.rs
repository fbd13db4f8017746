//! Shared setup for the HTTP integration tests
//!
//! Requests are driven through the full router with `oneshot`; no socket is
//! bound.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use edprep_web::{create_app, AppState, WebConfig};
use serde_json::Value;
use std::sync::LazyLock;
use tower::ServiceExt;

// Set TEST_LOG=1 to see server logs
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

/// App over a freshly seeded store
pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    let state = AppState::new(WebConfig::default())
        .await
        .expect("Failed to build application state");
    TestApp {
        router: create_app(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, token, None)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request(Method::DELETE, uri, token, None)).await
    }

    /// POST an urlencoded form
    pub async fn post_form(&self, uri: &str, form: &str, token: Option<&str>) -> TestResponse {
        let body = Some(("application/x-www-form-urlencoded", form.to_string()));
        self.send(request(Method::POST, uri, token, body)).await
    }

    pub async fn post_json(&self, uri: &str, json: Value, token: Option<&str>) -> TestResponse {
        let body = Some(("application/json", json.to_string()));
        self.send(request(Method::POST, uri, token, body)).await
    }

    /// Log in a seeded account and return its access token
    pub async fn login(&self, email: &str) -> String {
        let form = format!(
            "username={}&password={}",
            email.replace('@', "%40"),
            edprep_mentorship::seed::SEED_PASSWORD
        );
        let response = self.post_form("/api/v1/auth/login", &form, None).await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }
}

fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<(&str, String)>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some((content_type, body)) => builder
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub const ADMIN: &str = "admin1@edprep.ai";
pub const MENTOR: &str = "mentor1@edprep.ai";
pub const STUDENT: &str = "student1@edprep.ai";
pub const TUTOR: &str = "tutor1@edprep.ai";
