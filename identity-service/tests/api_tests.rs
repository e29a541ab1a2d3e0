mod common;

use auth::StaticSecret;
use common::TestApp;
use common::TEST_SECRET;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_sign_up_success() {
    let app = TestApp::spawn().await;

    let response = app.sign_up("admin", "admin").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["user_name"], "admin");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_sign_up_empty_fields() {
    let app = TestApp::spawn().await;

    for (user_name, password) in [("", ""), ("bob", ""), ("", "x")] {
        let response = app.sign_up(user_name, password).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(
            body["data"]["message"],
            "Please enter a valid username and password"
        );
    }
}

#[tokio::test]
async fn test_sign_up_duplicate_user_name() {
    let app = TestApp::spawn().await;

    app.sign_up("alice", "p1").await;
    let response = app.sign_up("alice", "p2").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already taken"));
}

#[tokio::test]
async fn test_sign_up_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/signup")
        .json(&json!({ "user_name": "bob" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_log_in_success() {
    let app = TestApp::spawn().await;
    app.sign_up("peter", "supersecret").await;

    let response = app.log_in("peter", "supersecret").await;

    assert_eq!(response.status(), StatusCode::OK);

    let header = response
        .headers()
        .get(reqwest::header::AUTHORIZATION)
        .expect("Missing Authorization header")
        .to_str()
        .unwrap()
        .to_string();

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(header, format!("Bearer {}", token));
    assert_eq!(body["data"]["user_name"], "peter");
}

#[tokio::test]
async fn test_log_in_failures_share_one_message() {
    let app = TestApp::spawn().await;
    app.sign_up("bob", "secret").await;

    let unknown = app.log_in("nosuchuser", "x").await;
    let wrong = app.log_in("bob", "secrett").await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown: serde_json::Value = unknown.json().await.unwrap();
    let wrong: serde_json::Value = wrong.json().await.unwrap();
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_log_in_without_signing_secret() {
    let app = TestApp::spawn_with(StaticSecret::none()).await;
    app.sign_up("bob", "secret").await;

    let response = app.log_in("bob", "secret").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response
        .headers()
        .get(reqwest::header::AUTHORIZATION)
        .is_none());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Token signing is not configured");
}

#[tokio::test]
async fn test_me_with_latest_token() {
    let app = TestApp::spawn().await;
    app.sign_up("anna", "password").await;
    let token = app.token_for("anna", "password").await;

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user_name"], "anna");
}

#[tokio::test]
async fn test_me_with_superseded_token() {
    let app = TestApp::spawn().await;
    app.sign_up("bob", "secret").await;

    let t1 = app.token_for("bob", "secret").await;
    let t2 = app.token_for("bob", "secret").await;

    let stale = app
        .get_authenticated("/api/auth/me", &t1)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);

    let fresh = app
        .get_authenticated("/api/auth/me", &t2)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(fresh.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_with_forged_token() {
    let app = TestApp::spawn().await;
    app.sign_up("admin", "admin").await;
    app.token_for("admin", "admin").await;

    // Correctly signed, but neither shaped like an issued token nor for a real user
    let forged = jsonwebtoken::encode(
        &Header::default(),
        &json!({ "UserName": "UserIWantToHack", "Test": "Hello World" }),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let response = app
        .get_authenticated("/api/auth/me", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Authentication failed, the access token is not valid"
    );
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/auth/me", "RandomStringWhichIsNoRealJWT")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
