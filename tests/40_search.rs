mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::TestApp;

async fn seeded() -> Result<(TestApp, String)> {
    let app = TestApp::spawn().await?;
    let manager = app.token_for("manager").await?;
    app.create_device(&manager, "Oscilloscope A", "SN-OSC-1001", "available").await?;
    app.create_device(&manager, "Data Logger X", "SN-DL-2002", "in-use").await?;
    app.create_device(&manager, "Biopac Amp", "SN-BA-3003", "available").await?;
    app.create_device(&manager, "Amp 100%", "SN-PCT-4004", "maintenance").await?;
    Ok((app, manager))
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .map(|rows| rows.iter().filter_map(|r| r["name"].as_str()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn exact_match_on_status() -> Result<()> {
    let (app, token) = seeded().await?;
    let (status, body) = app
        .get("/search?table=devices&column=status&type=exact&query=available", &token)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Oscilloscope A", "Biopac Amp"]);
    Ok(())
}

#[tokio::test]
async fn pattern_operators() -> Result<()> {
    let (app, token) = seeded().await?;

    let (_, body) = app
        .get("/search?table=devices&column=name&type=contains&query=Osc", &token)
        .await?;
    assert_eq!(names(&body), vec!["Oscilloscope A"]);

    let (_, body) = app
        .get("/search?table=devices&column=name&type=starts&query=Data", &token)
        .await?;
    assert_eq!(names(&body), vec!["Data Logger X"]);

    let (_, body) = app
        .get("/search?table=devices&column=serialNumber&type=ends&query=3003", &token)
        .await?;
    assert_eq!(names(&body), vec!["Biopac Amp"]);
    Ok(())
}

#[tokio::test]
async fn wildcards_in_query_match_literally() -> Result<()> {
    let (app, token) = seeded().await?;
    let (status, body) = app
        .get("/search?table=devices&column=name&type=contains&query=%25", &token)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Amp 100%"]);
    Ok(())
}

#[tokio::test]
async fn rejects_unknown_table_column_and_type() -> Result<()> {
    let (app, token) = seeded().await?;

    for (uri, message) in [
        ("/search?table=widgets&column=name&type=exact&query=x", "Invalid table name"),
        ("/search?table=devices&column=nonexistent&type=exact&query=x", "Invalid column name"),
        ("/search?table=users&column=password&type=exact&query=x", "Invalid column name"),
        ("/search?table=devices&column=name&type=regex&query=x", "Invalid search type"),
        ("/search?table=devices&column=name&type=exact", "Missing required search parameters"),
        ("/search?table=devices&column=name&type=exact&query=", "Missing required search parameters"),
    ] {
        let (status, body) = app.get(uri, &token).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body, json!({ "error": message }), "{}", uri);
    }
    Ok(())
}

#[tokio::test]
async fn injection_attempt_in_column_is_rejected() -> Result<()> {
    let (app, token) = seeded().await?;
    let (status, body) = app
        .get(
            "/search?table=devices&column=name%22%20OR%201%3D1%20--&type=exact&query=x",
            &token,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid column name");

    // Injection text in the value is only ever a bound parameter
    let (status, body) = app
        .get("/search?table=devices&column=name&type=exact&query=x%27%20OR%20%271%27%3D%271", &token)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn malformed_query_string_is_a_json_error() -> Result<()> {
    let (app, token) = seeded().await?;
    let (status, body) = app
        .get(
            "/search?table=devices&table=users&column=name&type=exact&query=x",
            &token,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid query string" }));
    Ok(())
}
