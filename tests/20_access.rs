mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{expired_token, TestApp};

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let app = TestApp::spawn().await?;

    for uri in ["/api/devices", "/api/assignments", "/api/users", "/api/users/profile", "/search"] {
        let (status, body) = app.request(Method::GET, uri, None, None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body, json!({ "error": "Authentication required" }));
    }
    Ok(())
}

#[tokio::test]
async fn token_failures_have_distinct_messages() -> Result<()> {
    let app = TestApp::spawn().await?;

    let expired = expired_token(1, "old@example.com", "admin")?;
    let (status, body) = app.get("/api/devices", &expired).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token expired");

    let (status, body) = app.get("/api/devices", "garbage").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");

    // Header and claims from one token, signature from another
    let a = app.token_for("engineer").await?;
    let b = app.token_for("admin").await?;
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();
    let forged = format!("{}.{}.{}", a_parts[0], b_parts[1], a_parts[2]);
    let (status, body) = app.get("/api/devices", &forged).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token signature");
    Ok(())
}

#[tokio::test]
async fn engineer_can_read_but_not_write() -> Result<()> {
    let app = TestApp::spawn().await?;
    let engineer = app.token_for("engineer").await?;

    let (status, _) = app.get("/api/devices", &engineer).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post("/api/devices", &engineer, json!({ "name": "Scope", "serialNumber": "SN-1" }))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "error": "Insufficient permissions" }));

    let (status, _) = app.get("/api/users", &engineer).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn role_text_is_case_sensitive() -> Result<()> {
    let app = TestApp::spawn().await?;
    let capitalised = app.token_for("Manager").await?;

    let (status, _) = app
        .post("/api/devices", &capitalised, json!({ "name": "Scope", "serialNumber": "SN-1" }))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn manager_writes_but_cannot_delete() -> Result<()> {
    let app = TestApp::spawn().await?;
    let manager = app.token_for("manager").await?;

    let id = app.create_device(&manager, "Data Logger X", "SN-DL-2002", "in-use").await?;

    let (status, _) = app
        .put(&format!("/api/devices/{}", id), &manager, json!({ "status": "available" }))
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.delete(&format!("/api/devices/{}", id), &manager).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Insufficient permissions");

    // Managers may read a single user but not list them
    let (status, _) = app.get("/api/users/1", &manager).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get("/api/users", &manager).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_passes_every_tier() -> Result<()> {
    let app = TestApp::spawn().await?;
    let admin = app.token_for("admin").await?;

    let id = app.create_device(&admin, "Oscilloscope A", "SN-OSC-1001", "available").await?;
    let (status, body) = app.delete(&format!("/api/devices/{}", id), &admin).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Device deleted successfully" }));

    let (status, body) = app.get("/api/users", &admin).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().is_some_and(|users| !users.is_empty()));
    Ok(())
}
