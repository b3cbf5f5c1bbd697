//! Integration tests for audio upload, listing and signed URLs.

use http::StatusCode;
use tower::ServiceExt;

use crate::helpers::TestApp;

const MP3_BYTES: &[u8] = b"ID3\x04\x00fake-mp3-payload";

#[tokio::test]
async fn test_upload_and_list() {
    let app = TestApp::new().await;
    app.register("peggy", "password123").await;
    let token = app.login("peggy", "password123").await;

    let upload = app
        .upload(&token, "Morning loop", "ambient", "audio/mpeg", MP3_BYTES)
        .await;
    assert_eq!(upload.status, StatusCode::CREATED);
    let audio_id = upload.body["id"].as_str().unwrap().to_string();

    let list = app.request("GET", "/audio_files/", Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    let files = list.body.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["id"], audio_id.as_str());
    assert_eq!(files[0]["description"], "Morning loop");
    assert_eq!(files[0]["category"], "ambient");
}

#[tokio::test]
async fn test_list_only_own_files() {
    let app = TestApp::new().await;
    app.register("rupert", "password123").await;
    app.register("sybil", "password123").await;
    let rupert = app.login("rupert", "password123").await;
    let sybil = app.login("sybil", "password123").await;

    app.upload(&rupert, "Rupert's track", "rock", "audio/mpeg", MP3_BYTES)
        .await;

    let list = app.request("GET", "/audio_files/", Some(&sybil)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_signed_url_for_owner() {
    let app = TestApp::new().await;
    app.register("trent", "password123").await;
    let token = app.login("trent", "password123").await;

    let upload = app
        .upload(&token, "Clip", "voice", "audio/wav", b"RIFFfake-wav")
        .await;
    let audio_id = upload.body["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/audio_files/token/{audio_id}"), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["audio_id"], audio_id.as_str());
    let url = response.body["audio_url"].as_str().unwrap();
    assert!(url.contains("expires="));
    assert!(url.contains("signature="));
}

#[tokio::test]
async fn test_signed_url_denied_for_stranger() {
    let app = TestApp::new().await;
    app.register("uma", "password123").await;
    app.register("victor", "password123").await;
    let uma = app.login("uma", "password123").await;
    let victor = app.login("victor", "password123").await;

    let upload = app
        .upload(&uma, "Private", "notes", "audio/mpeg", MP3_BYTES)
        .await;
    let audio_id = upload.body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "GET",
            &format!("/audio_files/token/{audio_id}"),
            Some(&victor),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signed_url_unknown_id() {
    let app = TestApp::new().await;
    app.register("walter", "password123").await;
    let token = app.login("walter", "password123").await;

    let response = app
        .request(
            "GET",
            "/audio_files/token/00000000-0000-0000-0000-000000000000",
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_upload_requires_auth() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/audio_files/", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_missing_file_part() {
    let app = TestApp::new().await;
    app.register("xena", "password123").await;
    let token = app.login("xena", "password123").await;

    let boundary = "sv-test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\nNo file\r\n--{boundary}--\r\n"
    );
    let req = http::Request::builder()
        .method("POST")
        .uri("/audio_files/")
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(axum::body::Body::from(body))
        .unwrap();
    let response = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_delete_cascades_to_audio() {
    let app = TestApp::new().await;
    app.register("yves", "password123").await;
    let token = app.login("yves", "password123").await;

    app.upload(&token, "Doomed", "misc", "audio/mpeg", MP3_BYTES)
        .await;

    let delete = app.request("DELETE", "/users/", Some(&token)).await;
    assert_eq!(delete.status, StatusCode::ACCEPTED);

    let list = app.request("GET", "/audio_files/", Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.as_array().unwrap().is_empty());
}
