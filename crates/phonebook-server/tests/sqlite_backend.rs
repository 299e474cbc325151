// SPDX-License-Identifier: Apache-2.0

use phonebook_server::{build_router, AppState, SqliteStore};
use std::sync::Arc;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn send_raw(
    addr: std::net::SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (u16, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let body = body.unwrap_or("");
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, body.to_string())
}

#[tokio::test]
async fn sqlite_backed_server_persists_across_requests() {
    let dir = tempdir().expect("tempdir");
    let store = SqliteStore::open(&dir.path().join("phonebook.sqlite")).expect("open sqlite");
    let app = build_router(AppState::new(Arc::new(store)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    let payload = r#"{"name":"Ada Lovelace","number":"39-44-5323523"}"#;
    let (status, body) = send_raw(addr, "POST", "/api/persons", Some(payload)).await;
    assert_eq!(status, 201);
    let created: serde_json::Value = serde_json::from_str(&body).expect("create json");
    let id = created["person"]["id"].as_str().expect("id").to_string();

    let (status, body) = send_raw(addr, "GET", "/api/persons", None).await;
    assert_eq!(status, 200);
    let listed: serde_json::Value = serde_json::from_str(&body).expect("list json");
    assert_eq!(listed["persons"][0]["id"], id.as_str());

    let (status, body) = send_raw(addr, "POST", "/api/persons", Some(payload)).await;
    assert_eq!(status, 400);
    let error: serde_json::Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(error["error"]["code"], "duplicate_name");

    let (status, body) = send_raw(addr, "GET", "/info", None).await;
    assert_eq!(status, 200);
    assert!(body.contains("Phonebook has info for 1 people"));
}
