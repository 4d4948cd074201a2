//! End-to-end tests for the export loop against a mocked Drive API.

use std::fs;
use std::path::Path;

use drive_sync::error::DriveError;
use drive_sync::{run, sync_folder, CredentialSource, DriveClient, StaticToken, SyncConfig};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use tempfile::TempDir;

const TEST_KEY: &str = include_str!("fixtures/test_rsa_key.pem");
const DOC: &str = "application/vnd.google-apps.document";
const SLIDES: &str = "application/vnd.google-apps.presentation";
const SHEET: &str = "application/vnd.google-apps.spreadsheet";

async fn mock_listing(server: &mut ServerGuard, files: serde_json::Value) -> Mock {
    server
        .mock("GET", "/files")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "'folder-1' in parents and trashed = false".into(),
        ))
        .with_header("content-type", "application/json")
        .with_body(json!({ "files": files }).to_string())
        .create_async()
        .await
}

async fn mock_export(server: &mut ServerGuard, id: &str, body: &str, hits: usize) -> Mock {
    server
        .mock("GET", format!("/files/{}/export", id).as_str())
        .match_query(Matcher::UrlEncoded("mimeType".into(), "text/plain".into()))
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn exports_documents_and_presentations_only() {
    let mut server = Server::new_async().await;
    let out = TempDir::new().unwrap();

    mock_listing(
        &mut server,
        json!([
            {"id": "d1", "name": "Meeting Notes", "mimeType": DOC},
            {"id": "d2", "name": "meeting notes!", "mimeType": DOC},
            {"id": "s1", "name": "Q3 Review", "mimeType": SLIDES},
            {"id": "x1", "name": "Budget", "mimeType": SHEET},
            {"id": "p1", "name": "Scan.pdf", "mimeType": "application/pdf"}
        ]),
    )
    .await;
    let d1 = mock_export(&mut server, "d1", "first notes", 1).await;
    let d2 = mock_export(&mut server, "d2", "second notes", 1).await;
    let s1 = mock_export(&mut server, "s1", "slide text", 1).await;
    let x1 = mock_export(&mut server, "x1", "", 0).await;
    let p1 = mock_export(&mut server, "p1", "", 0).await;

    let client = DriveClient::with_base_url(StaticToken("t".to_string()), server.url());
    let report = sync_folder(&client, "folder-1", out.path()).await.unwrap();

    assert_eq!(report.exported.len(), 3);
    assert_eq!(report.skipped, 2);
    assert_eq!(
        file_names(out.path()),
        vec![
            "meeting-notes__d1.txt",
            "meeting-notes__d2.txt",
            "q3-review__s1.txt"
        ]
    );
    assert_eq!(
        fs::read_to_string(out.path().join("meeting-notes__d2.txt")).unwrap(),
        "second notes"
    );

    for mock in [d1, d2, s1, x1, p1] {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn overwrites_existing_export() {
    let mut server = Server::new_async().await;
    let out = TempDir::new().unwrap();
    let target = out.path().join("handbook__h1.txt");
    fs::write(&target, "old content from a previous run").unwrap();

    mock_listing(&mut server, json!([{"id": "h1", "name": "Handbook", "mimeType": DOC}])).await;
    mock_export(&mut server, "h1", "new", 1).await;

    let client = DriveClient::with_base_url(StaticToken("t".to_string()), server.url());
    sync_folder(&client, "folder-1", out.path()).await.unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "new");
}

#[tokio::test]
async fn empty_and_symbol_names_fall_back() {
    let mut server = Server::new_async().await;
    let out = TempDir::new().unwrap();

    mock_listing(
        &mut server,
        json!([
            {"id": "e1", "mimeType": DOC},
            {"id": "e2", "name": "!!!", "mimeType": SLIDES}
        ]),
    )
    .await;
    mock_export(&mut server, "e1", "a", 1).await;
    mock_export(&mut server, "e2", "b", 1).await;

    let client = DriveClient::with_base_url(StaticToken("t".to_string()), server.url());
    sync_folder(&client, "folder-1", out.path()).await.unwrap();

    assert_eq!(
        file_names(out.path()),
        vec!["doc__e2.txt", "untitled__e1.txt"]
    );
}

#[tokio::test]
async fn export_failure_aborts_remaining_entries() {
    let mut server = Server::new_async().await;
    let out = TempDir::new().unwrap();

    mock_listing(
        &mut server,
        json!([
            {"id": "bad", "name": "Broken", "mimeType": DOC},
            {"id": "good", "name": "Fine", "mimeType": DOC}
        ]),
    )
    .await;
    server
        .mock("GET", "/files/bad/export")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(json!({"error": {"code": 500, "message": "Internal error"}}).to_string())
        .create_async()
        .await;
    let good = mock_export(&mut server, "good", "never", 0).await;

    let client = DriveClient::with_base_url(StaticToken("t".to_string()), server.url());
    let err = sync_folder(&client, "folder-1", out.path()).await.unwrap_err();

    assert!(matches!(err, DriveError::ApiError { status: 500, .. }));
    good.assert_async().await;
}

#[tokio::test]
async fn run_aborts_before_network_without_credentials() {
    let mut server = Server::new_async().await;
    let base = TempDir::new().unwrap();

    let any_get = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let any_post = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = SyncConfig::for_base_dir(base.path()).with_api_base(server.url());
    let err = run(&config).await.unwrap_err();

    assert!(matches!(err, DriveError::MissingCredentials(_)));
    any_get.assert_async().await;
    any_post.assert_async().await;
}

#[tokio::test]
async fn run_with_inline_credentials() {
    let mut server = Server::new_async().await;
    let base = TempDir::new().unwrap();

    let token = server
        .mock("POST", "/token")
        .with_header("content-type", "application/json")
        .with_body(
            json!({"access_token": "ya29.live", "token_type": "Bearer", "expires_in": 3600})
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/files")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer ya29.live")
        .with_header("content-type", "application/json")
        .with_body(json!({"files": [{"id": "k1", "name": "Kiến thức", "mimeType": DOC}]}).to_string())
        .create_async()
        .await;
    mock_export(&mut server, "k1", "nội dung", 1).await;

    let credentials = json!({
        "client_email": "sync@project.iam.gserviceaccount.com",
        "private_key": TEST_KEY,
        "token_uri": format!("{}/token", server.url())
    })
    .to_string();
    let config = SyncConfig::for_base_dir(base.path())
        .with_folder_id("folder-1")
        .with_credentials(CredentialSource::Inline(credentials))
        .with_api_base(server.url());

    let report = run(&config).await.unwrap();

    let expected = base.path().join("knowledge").join("_drive").join("kiến-thức__k1.txt");
    assert_eq!(report.exported, vec![expected.clone()]);
    assert_eq!(fs::read_to_string(expected).unwrap(), "nội dung");
    token.assert_async().await;
}
