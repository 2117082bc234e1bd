//! Exercises `CurseClient` against a one-shot local HTTP responder.

use modshelf_catalog::{CatalogClient, CatalogConfig, CatalogError, CurseClient};
use modshelf_core::{Section, SortMode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve exactly one request with `status` and `body`, reporting the
/// request head (request line plus headers) back through the returned channel.
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let head = String::from_utf8_lossy(&buf).to_string();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(head);
    });

    (format!("http://{}/api/v2", addr), rx)
}

fn client_for(base_url: String) -> CurseClient {
    let config = CatalogConfig {
        base_url,
        api_key: Some("test-key".into()),
        ..CatalogConfig::default()
    };
    CurseClient::new(config).unwrap()
}

#[tokio::test]
async fn search_sends_query_and_parses_entries() {
    let body = r#"[
        {"id": 1, "name": "First", "summary": "one"},
        {"id": 2, "name": "Second", "summary": "two"}
    ]"#;
    let (base, head_rx) = serve_once("200 OK", body).await;
    let client = client_for(base);

    let entries = client
        .search_paginated("1.16.5", 423, Section::Mod, 50, "map", SortMode::TotalDownloads)
        .await
        .unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);

    let head = head_rx.await.unwrap();
    let request_line = head.lines().next().unwrap();
    assert!(request_line.starts_with("GET /api/v2/addon/search?"));
    assert!(request_line.contains("categoryId=423"));
    assert!(request_line.contains("gameId=432"));
    assert!(request_line.contains("gameVersion=1.16.5"));
    assert!(request_line.contains("index=50"));
    assert!(request_line.contains("searchFilter=map"));
    assert!(request_line.contains("sectionId=6"));
    assert!(request_line.contains("sort=5"));
    assert!(head.to_lowercase().contains("x-api-key: test-key"));
}

#[tokio::test]
async fn categories_are_reorganized() {
    let body = r#"[
        {"id": 407, "name": "Biomes", "parentGameCategoryId": 406, "rootGameCategoryId": 6},
        {"id": 406, "name": "World Gen", "parentGameCategoryId": 6, "rootGameCategoryId": 6}
    ]"#;
    let (base, head_rx) = serve_once("200 OK", body).await;
    let client = client_for(base);

    let forest = client.get_categories(Section::Mod).await.unwrap();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].id, 406);
    assert_eq!(forest[0].subcategories[0].id, 407);

    let head = head_rx.await.unwrap();
    assert!(head.starts_with("GET /api/v2/category/section/6 "));
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let (base, _head) = serve_once("503 Service Unavailable", "maintenance").await;
    let client = client_for(base);

    let err = client
        .search_paginated("", 0, Section::Mod, 0, "", SortMode::DateCreated)
        .await
        .unwrap_err();
    match err {
        CatalogError::Status { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_body_maps_to_parse_error() {
    let (base, _head) = serve_once("200 OK", "<html>not json</html>").await;
    let client = client_for(base);

    let err = client
        .search_paginated("", 0, Section::Mod, 0, "", SortMode::DateCreated)
        .await
        .unwrap_err();
    match err {
        CatalogError::Parse { excerpt, .. } => assert!(excerpt.contains("not json")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_addon_is_not_found() {
    let (base, _head) = serve_once("404 Not Found", "").await;
    let client = client_for(base);

    let err = client.get_addon(99).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(99)));
}
