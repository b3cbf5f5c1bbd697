//! Integration tests for user registration, profile, update and delete.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_returns_id_and_created_at() {
    let app = TestApp::new().await;

    let response = app
        .form(
            "POST",
            "/users/",
            "username=dave&email=dave%40test.com&password=secretpw&full_name=Dave",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["id"].as_str().is_some());
    assert!(response.body["created_at"].as_i64().is_some());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    app.register("erin", "password123").await;

    let response = app
        .form(
            "POST",
            "/users/",
            "username=erin&email=other%40test.com&password=secretpw&full_name=Erin+Two",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "DUPLICATE_KEY");
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .form(
            "POST",
            "/users/",
            "username=frank&email=not-an-email&password=secretpw&full_name=Frank",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_get_profile() {
    let app = TestApp::new().await;
    let id = app.register("grace", "password123").await;
    let token = app.login("grace", "password123").await;

    let response = app.request("GET", "/users/", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id.as_str());
    assert_eq!(response.body["username"], "grace");
    assert_eq!(response.body["email"], "grace@test.com");
    assert_eq!(response.body["disabled"], false);
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    let id = app.register("heidi", "password123").await;
    let token = app.login("heidi", "password123").await;

    let response = app
        .form("PUT", "/users/", "full_name=Heidi+Renamed", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["id"], id.as_str());
    assert!(response.body["updated_at"].as_i64().is_some());

    let profile = app.request("GET", "/users/", Some(&token)).await;
    assert_eq!(profile.body["full_name"], "Heidi Renamed");
}

#[tokio::test]
async fn test_update_with_no_changes_conflicts() {
    let app = TestApp::new().await;
    app.register("ivan", "password123").await;
    let token = app.login("ivan", "password123").await;

    let first = app
        .form("PUT", "/users/", "full_name=Ivan+Same", Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::ACCEPTED);

    let second = app
        .form("PUT", "/users/", "full_name=Ivan+Same", Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "NO_CHANGE");
}

#[tokio::test]
async fn test_password_change_allows_new_login() {
    let app = TestApp::new().await;
    app.register("judy", "password123").await;
    let token = app.login("judy", "password123").await;

    let response = app
        .form("PUT", "/users/", "password=newpassword", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    let old = app
        .form("POST", "/token", "username=judy&password=password123", None)
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    app.login("judy", "newpassword").await;
}

#[tokio::test]
async fn test_soft_delete_hides_account() {
    let app = TestApp::new().await;
    let id = app.register("mallory", "password123").await;
    let token = app.login("mallory", "password123").await;

    let response = app.request("DELETE", "/users/", Some(&token)).await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["id"], id.as_str());
    assert!(response.body["deleted_at"].as_i64().is_some());

    let login = app
        .form(
            "POST",
            "/token",
            "username=mallory&password=password123",
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    let profile = app.request("GET", "/users/", Some(&token)).await;
    assert_eq!(profile.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hard_delete_frees_username() {
    let app = TestApp::new().await;
    app.register("oscar", "password123").await;
    let token = app.login("oscar", "password123").await;

    let response = app
        .request("DELETE", "/users/?hard=true", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    // Physical removal makes the username available again.
    app.register("oscar", "differentpw").await;
}
