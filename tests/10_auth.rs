mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{token_of, TestApp};

#[tokio::test]
async fn health_and_root_are_public() -> Result<()> {
    let app = TestApp::spawn().await?;

    let (status, body) = app.request(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = app.request(Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Inventory API");
    Ok(())
}

#[tokio::test]
async fn register_returns_token_and_rejects_duplicates() -> Result<()> {
    let app = TestApp::spawn().await?;

    let token = app.register("alice@example.com", "password123", "engineer").await?;
    assert_eq!(token.split('.').count(), 3);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/register",
            None,
            Some(json!({ "email": "alice@example.com", "password": "other" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "User already exists" }));
    Ok(())
}

#[tokio::test]
async fn register_requires_email_and_password() -> Result<()> {
    let app = TestApp::spawn().await?;

    for body in [json!({ "email": "x@example.com" }), json!({ "password": "pw" }), json!({ "email": "", "password": "pw" })] {
        let (status, body) = app.request(Method::POST, "/api/register", None, Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email and password are required");
    }
    Ok(())
}

#[tokio::test]
async fn login_issues_token_for_correct_password() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.register("bob@example.com", "s3cret!", "technician").await?;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "bob@example.com", "password": "s3cret!" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);

    let claims = app.state.tokens.verify(&token_of(&body)?)?;
    assert_eq!(claims.email, "bob@example.com");
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.register("carol@example.com", "right-password", "manager").await?;

    let (wrong_status, wrong_body) = app
        .request(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "carol@example.com", "password": "wrong-password" })),
        )
        .await?;
    let (unknown_status, unknown_body) = app
        .request(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "wrong-password" })),
        )
        .await?;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, json!({ "error": "Invalid email or password" }));
    assert_eq!(wrong_body, unknown_body);
    Ok(())
}

#[tokio::test]
async fn stored_password_is_hashed() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.register("dave@example.com", "plain-text-pw", "engineer").await?;

    let user = app
        .state
        .store
        .find_user_by_email("dave@example.com")
        .await?
        .expect("registered user");
    assert_ne!(user.password_hash(), "plain-text-pw");
    assert!(user.password_hash().starts_with("$2"));
    Ok(())
}

#[tokio::test]
async fn logout_needs_a_token() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.token_for("engineer").await?;

    let (status, body) = app.request(Method::POST, "/api/logout", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Logout successful" }));

    let (status, _) = app.request(Method::POST, "/api/logout", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_bad_request() -> Result<()> {
    let app = TestApp::spawn().await?;
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))?;

    let (status, body) = app.send(request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");
    Ok(())
}
