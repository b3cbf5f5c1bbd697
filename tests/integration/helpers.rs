//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use soundvault_api::{build_app, build_state};
use soundvault_core::config::AppConfig;
use soundvault_database::{Engine, MemoryBackend};
use soundvault_entity::schema_registry;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    _blob_dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application backed by the in-memory store and a
    /// temporary blob directory.
    pub async fn new() -> Self {
        let blob_dir = tempfile::tempdir().expect("Failed to create temp blob dir");

        let mut config = AppConfig::default();
        config.auth.secret_key = "integration-test-secret".to_string();
        config.storage.root_path = blob_dir.path().display().to_string();

        let engine = Arc::new(Engine::new(
            Arc::new(MemoryBackend::new()),
            schema_registry(),
        ));
        let storage = soundvault_storage::build_storage(&config.storage)
            .await
            .expect("Failed to init storage");

        let state = build_state(config, engine, storage).expect("Failed to build state");
        let router = build_app(state);

        Self {
            router,
            _blob_dir: blob_dir,
        }
    }

    /// Register a user and return the created id as a string.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let body = format!(
            "username={username}&email={username}%40test.com&password={password}&full_name=Test+User"
        );
        let response = self.form("POST", "/users/", &body, None).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        response.body["id"]
            .as_str()
            .expect("No id in registration response")
            .to_string()
    }

    /// Login and return the bearer access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = format!("username={username}&password={password}");
        let response = self.form("POST", "/token", &body, None).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.body["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Send a urlencoded form request.
    pub async fn form(
        &self,
        method: &str,
        path: &str,
        body: &str,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");

        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Send a bodyless request (GET / DELETE).
    pub async fn request(&self, method: &str, path: &str, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req.body(Body::empty()).expect("Failed to build request");
        self.send(req).await
    }

    /// Upload an audio file via multipart form.
    pub async fn upload(
        &self,
        token: &str,
        description: &str,
        category: &str,
        content_type: &str,
        data: &[u8],
    ) -> TestResponse {
        let boundary = "sv-test-boundary";
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in [("description", description), ("category", category)] {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"audio_file\"; \
                 filename=\"clip\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/audio_files/")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}
