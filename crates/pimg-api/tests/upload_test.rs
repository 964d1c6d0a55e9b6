//! Upload API integration tests against a mocked GitHub API.
//!
//! Run with: `cargo test -p pimg-api --test upload_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::fixtures::{create_minimal_png, image_part, png_upload_form, TEST_TOKEN};
use helpers::{setup_test_app, setup_test_app_with, TEST_ORIGIN};
use mockito::Matcher;
use pimg_core::StorageStrategy;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn is_generated_name(name: &str, ext: &str) -> bool {
    name.strip_prefix("obsidian-upload-")
        .and_then(|rest| rest.strip_suffix(&format!(".{}", ext)))
        .is_some_and(|millis| !millis.is_empty() && millis.chars().all(|c| c.is_ascii_digit()))
}

#[tokio::test]
async fn test_gist_upload_then_retrieve_roundtrip() {
    let mut app = setup_test_app(StorageStrategy::Gist).await;
    let posted: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));

    let capture = posted.clone();
    let create = app
        .github
        .mock("POST", "/gists")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .match_header("user-agent", "Pimg-Worker")
        .match_body(Matcher::PartialJson(json!({ "public": false })))
        .with_status(201)
        .with_body_from_request(move |request| {
            let body: Value = serde_json::from_slice(request.body().unwrap()).unwrap();
            *capture.lock().unwrap() = Some(body);
            br#"{"id":"g1"}"#.to_vec()
        })
        .create_async()
        .await;

    let stored = posted.clone();
    let fetch = app
        .github
        .mock("GET", "/gists/g1")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body_from_request(move |_| {
            let body = stored.lock().unwrap().clone().unwrap();
            json!({ "id": "g1", "files": body["files"] }).to_string().into_bytes()
        })
        .expect(2)
        .create_async()
        .await;

    let response = app.client().post("/").multipart(png_upload_form()).await;
    assert_eq!(response.status_code(), 200);

    let json: Value = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["gistId"], "g1");
    let file_name = json["fileName"].as_str().unwrap().to_string();
    assert!(is_generated_name(&file_name, "png"), "unexpected name {}", file_name);
    assert_eq!(
        json["imageUrl"],
        format!("{}/gist/g1/{}", TEST_ORIGIN, file_name)
    );

    let description = posted.lock().unwrap().clone().unwrap()["description"].clone();
    assert_eq!(description, format!("Image uploaded by Pimg: {}", file_name));

    let path = json["imageUrl"]
        .as_str()
        .unwrap()
        .strip_prefix(TEST_ORIGIN)
        .unwrap()
        .to_string();
    let first = app.client().get(&path).await;
    let second = app.client().get(&path).await;

    assert_eq!(first.status_code(), 200);
    assert_eq!(first.header("content-type"), "image/png");
    assert_eq!(first.as_bytes().to_vec(), create_minimal_png());
    assert_eq!(first.as_bytes(), second.as_bytes());

    create.assert_async().await;
    fetch.assert_async().await;
}

#[tokio::test]
async fn test_upload_keeps_original_mime_and_extension() {
    let mut app = setup_test_app(StorageStrategy::Gist).await;
    let create = app
        .github
        .mock("POST", "/gists")
        .match_body(Matcher::Regex(r#"\\"mimeType\\":\\"image/jpeg\\""#.to_string()))
        .with_status(201)
        .with_body(r#"{"id":"g2"}"#)
        .create_async()
        .await;

    let form = MultipartForm::new()
        .add_part("image", image_part(vec![0xFF, 0xD8, 0xFF], "Holiday.JPG", "image/jpeg"))
        .add_text("githubAccessToken", TEST_TOKEN);
    let response = app.client().post("/").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let json: Value = response.json();
    assert!(is_generated_name(json["fileName"].as_str().unwrap(), "jpg"));
    create.assert_async().await;
}

#[tokio::test]
async fn test_missing_image_is_rejected() {
    let mut app = setup_test_app(StorageStrategy::Gist).await;
    let create = app.github.mock("POST", "/gists").expect(0).create_async().await;

    let form = MultipartForm::new().add_text("githubAccessToken", TEST_TOKEN);
    let response = app.client().post("/").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "Image file is required");
    assert_eq!(response.header("access-control-allow-origin"), "*");
    create.assert_async().await;
}

#[tokio::test]
async fn test_non_image_type_makes_no_upstream_call() {
    let mut app = setup_test_app(StorageStrategy::Gist).await;
    let any = app
        .github
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let form = MultipartForm::new()
        .add_part("image", image_part(b"hello".to_vec(), "notes.txt", "text/plain"))
        .add_text("githubAccessToken", TEST_TOKEN);
    let response = app.client().post("/").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "Invalid image file type");
    any.assert_async().await;
}

#[tokio::test]
async fn test_empty_image_and_missing_token() {
    let app = setup_test_app(StorageStrategy::Gist).await;

    let empty = MultipartForm::new()
        .add_part("image", image_part(Vec::new(), "a.png", "image/png"))
        .add_text("githubAccessToken", TEST_TOKEN);
    let response = app.client().post("/").multipart(empty).await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "Image file is empty");

    let no_token = MultipartForm::new()
        .add_part("image", image_part(create_minimal_png(), "a.png", "image/png"))
        .add_text("githubAccessToken", "   ");
    let response = app.client().post("/").multipart(no_token).await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "GitHub access token is required");
}

#[tokio::test]
async fn test_gist_creation_failure_is_reported() {
    let mut app = setup_test_app(StorageStrategy::Gist).await;
    app.github
        .mock("POST", "/gists")
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;

    let response = app.client().post("/").multipart(png_upload_form()).await;

    assert_eq!(response.status_code(), 500);
    let body = response.text();
    assert_eq!(body, "Gist creation failed: 401 - Bad credentials");
    assert!(!body.contains(TEST_TOKEN));
}

#[tokio::test]
async fn test_commit_upload_returns_issue_number() {
    let mut app = setup_test_app(StorageStrategy::Commit).await;
    let download_url = "https://raw.githubusercontent.com/octocat/vault/main/images/x.png";

    let commit = app
        .github
        .mock(
            "PUT",
            Matcher::Regex(r"^/repos/octocat/vault/contents/images/obsidian-upload-\d+\.png$".to_string()),
        )
        .match_body(Matcher::PartialJson(json!({ "branch": "main" })))
        .with_status(201)
        .with_body(json!({ "content": { "download_url": download_url } }).to_string())
        .create_async()
        .await;
    let issue = app
        .github
        .mock("POST", "/repos/octocat/vault/issues")
        .match_body(Matcher::Regex("Uploaded via Pimg".to_string()))
        .with_status(201)
        .with_body(r#"{"number":12}"#)
        .create_async()
        .await;

    let form = png_upload_form()
        .add_text("githubUsername", "octocat")
        .add_text("githubRepository", "vault");
    let response = app.client().post("/").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let json: Value = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["imageUrl"], download_url);
    assert_eq!(json["issueNumber"], 12);
    assert!(json.get("gistId").is_none());
    commit.assert_async().await;
    issue.assert_async().await;
}

#[tokio::test]
async fn test_commit_upload_uses_default_repository() {
    let mut app = setup_test_app_with(StorageStrategy::Commit, |config| {
        config.github.default_repository = Some("attachments".to_string());
    })
    .await;
    let commit = app
        .github
        .mock("PUT", Matcher::Regex(r"^/repos/octocat/attachments/contents/".to_string()))
        .with_status(201)
        .with_body(r#"{"content":{"download_url":"https://raw.example/x.png"}}"#)
        .create_async()
        .await;
    app.github
        .mock("POST", "/repos/octocat/attachments/issues")
        .with_status(201)
        .with_body(r#"{"number":1}"#)
        .create_async()
        .await;

    let form = png_upload_form().add_text("githubUsername", "octocat");
    let response = app.client().post("/").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    commit.assert_async().await;
}

#[tokio::test]
async fn test_commit_upload_requires_username() {
    let mut app = setup_test_app(StorageStrategy::Commit).await;
    let commit = app
        .github
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let form = png_upload_form().add_text("githubRepository", "vault");
    let response = app.client().post("/").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "GitHub username is required");
    commit.assert_async().await;
}

#[tokio::test]
async fn test_issue_failure_after_commit_is_500() {
    let mut app = setup_test_app(StorageStrategy::Commit).await;
    let commit = app
        .github
        .mock("PUT", Matcher::Regex(r"^/repos/octocat/vault/contents/".to_string()))
        .with_status(201)
        .with_body(r#"{"content":{"download_url":"https://raw.example/x.png"}}"#)
        .create_async()
        .await;
    app.github
        .mock("POST", "/repos/octocat/vault/issues")
        .with_status(410)
        .with_body(r#"{"message":"Issues are disabled for this repo"}"#)
        .create_async()
        .await;

    let form = png_upload_form()
        .add_text("githubUsername", "octocat")
        .add_text("githubRepository", "vault");
    let response = app.client().post("/").multipart(form).await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.text(),
        "Issue creation failed: 410 - Issues are disabled for this repo"
    );
    commit.assert_async().await;
}

#[tokio::test]
async fn test_oversized_body_is_413_with_cors() {
    let mut app = setup_test_app_with(StorageStrategy::Gist, |config| {
        config.base.max_upload_size_bytes = 256;
    })
    .await;
    let create = app.github.mock("POST", "/gists").expect(0).create_async().await;

    let form = MultipartForm::new()
        .add_part("image", image_part(vec![0u8; 4096], "big.png", "image/png"))
        .add_text("githubAccessToken", TEST_TOKEN);
    let response = app.client().post("/").multipart(form).await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(response.header("access-control-allow-origin"), "*");
    create.assert_async().await;
}
