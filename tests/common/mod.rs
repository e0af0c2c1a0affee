#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use inventory_api::{app, config::AppConfig, database::Store, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

static NEXT_USER: AtomicUsize = AtomicUsize::new(1);

/// Full router over a private in-memory database
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let config = AppConfig::for_tests(TEST_SECRET);
        let store = Store::connect(&config.database).await.context("connect store")?;
        store.migrate(false).await.context("migrate")?;
        let state = AppState::new(config, store).context("app state")?;
        Ok(Self {
            router: app(state.clone()),
            state,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| {
                format!("non-JSON body: {}", String::from_utf8_lossy(&bytes))
            })?
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Register through the API and return the issued token
    pub async fn register(&self, email: &str, password: &str, role: &str) -> Result<String> {
        let body = json!({
            "name": email.split('@').next().unwrap_or(email),
            "email": email,
            "password": password,
            "department": "Lab",
            "role": role,
        });
        let (status, body) = self
            .request(Method::POST, "/api/register", None, Some(body))
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);
        token_of(&body)
    }

    /// Token for a fresh user with `role`
    pub async fn token_for(&self, role: &str) -> Result<String> {
        let n = NEXT_USER.fetch_add(1, Ordering::SeqCst);
        self.register(&format!("{}{}@example.com", role, n), "password123", role)
            .await
    }

    /// Create a device as a manager and return its id
    pub async fn create_device(&self, manager: &str, name: &str, serial: &str, status: &str) -> Result<i64> {
        let (code, body) = self
            .post(
                "/api/devices",
                manager,
                json!({ "name": name, "type": "Instrument", "serialNumber": serial, "status": status }),
            )
            .await?;
        anyhow::ensure!(code == StatusCode::CREATED, "create device failed: {} {}", code, body);
        body["id"].as_i64().context("device id")
    }
}

pub fn token_of(body: &Value) -> Result<String> {
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("response has no token")
}

/// A correctly signed token whose expiry is already in the past
pub fn expired_token(id: i64, email: &str, role: &str) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "id": id,
        "email": email,
        "role": role,
        "iat": now - 7200,
        "exp": now - 3600,
    });
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )?)
}
