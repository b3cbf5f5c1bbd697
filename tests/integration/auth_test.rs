//! Integration tests for the token endpoint and bearer auth.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    app.register("alice", "password123").await;

    let response = app
        .form("POST", "/token", "username=alice&password=password123", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access_token"].as_str().is_some());
    assert_eq!(response.body["token_type"], "bearer");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new().await;
    app.register("bob", "password123").await;

    let response = app
        .form("POST", "/token", "username=bob&password=wrongpassword", None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers["www-authenticate"], "Bearer");
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_unknown_user_same_message_as_bad_password() {
    let app = TestApp::new().await;
    app.register("carol", "password123").await;

    let bad_password = app
        .form("POST", "/token", "username=carol&password=nope", None)
        .await;
    let unknown_user = app
        .form("POST", "/token", "username=nobody&password=nope", None)
        .await;

    assert_eq!(bad_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(bad_password.body["message"], unknown_user.body["message"]);
}

#[tokio::test]
async fn test_missing_auth_header() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/users/", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers["www-authenticate"], "Bearer");
}

#[tokio::test]
async fn test_malformed_auth_header() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/users/", Some("")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let garbage = app.request("GET", "/users/", Some("not.a.jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}
