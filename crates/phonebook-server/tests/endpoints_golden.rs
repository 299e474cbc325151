// SPDX-License-Identifier: Apache-2.0

use phonebook_server::{build_router, ApiConfig, AppState, MemoryStore};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn spawn_server(state: AppState) -> std::net::SocketAddr {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(
    addr: std::net::SocketAddr,
    method: &str,
    path: &str,
    extra_headers: &str,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n{extra_headers}\r\n"
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
    (status, head.to_string(), body.to_string())
}

fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.eq_ignore_ascii_case(name).then(|| value.trim())
    })
}

#[tokio::test]
async fn landing_and_health_endpoints_answer() {
    let addr = spawn_server(AppState::new(Arc::new(MemoryStore::new()))).await;

    let (status, head, body) = send_raw(addr, "GET", "/", "").await;
    assert_eq!(status, 200);
    assert!(body.contains("<h1>Hello World!</h1>"));
    assert!(header_value(&head, "content-type")
        .expect("content type")
        .starts_with("text/html"));

    let (status, _, body) = send_raw(addr, "GET", "/healthz", "").await;
    assert_eq!(status, 200);
    let health: serde_json::Value = serde_json::from_str(&body).expect("health json");
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn info_reports_the_phonebook_size() {
    let addr = spawn_server(AppState::new(Arc::new(MemoryStore::demo()))).await;
    let (status, head, body) = send_raw(addr, "GET", "/info", "").await;
    assert_eq!(status, 200);
    assert!(body.contains("<p>Phonebook has info for 5 people</p>"));
    assert!(header_value(&head, "content-type")
        .expect("content type")
        .starts_with("text/html"));
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let addr = spawn_server(AppState::new(Arc::new(MemoryStore::new()))).await;
    let (_, first, _) = send_raw(addr, "GET", "/api/persons", "").await;
    let (_, second, _) = send_raw(addr, "GET", "/api/persons", "").await;
    let first_id = header_value(&first, "x-request-id").expect("request id");
    let second_id = header_value(&second, "x-request-id").expect("request id");
    assert!(first_id.starts_with("req-"));
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn cors_preflight_and_response_headers_follow_the_allow_list() {
    let api = ApiConfig {
        cors_allowed_origins: vec!["http://localhost:5173".to_string()],
        ..ApiConfig::default()
    };
    let addr = spawn_server(AppState::with_config(Arc::new(MemoryStore::new()), api)).await;

    let (status, head, _) = send_raw(
        addr,
        "OPTIONS",
        "/api/persons",
        "Origin: http://localhost:5173\r\n",
    )
    .await;
    assert_eq!(status, 204);
    assert_eq!(
        header_value(&head, "access-control-allow-origin"),
        Some("http://localhost:5173")
    );
    assert!(header_value(&head, "access-control-allow-methods")
        .expect("allow methods")
        .contains("DELETE"));
    assert_eq!(header_value(&head, "vary"), Some("origin"));

    let (_, head, _) = send_raw(
        addr,
        "GET",
        "/api/persons",
        "Origin: http://evil.example\r\n",
    )
    .await;
    assert_eq!(header_value(&head, "access-control-allow-origin"), None);
    // Denied responses still differ by origin, so caches must key on it.
    assert_eq!(header_value(&head, "vary"), Some("origin"));
}

#[tokio::test]
async fn wildcard_origin_echoes_the_caller() {
    let addr = spawn_server(AppState::new(Arc::new(MemoryStore::new()))).await;
    let (_, head, _) = send_raw(
        addr,
        "GET",
        "/api/persons",
        "Origin: http://localhost:3000\r\n",
    )
    .await;
    assert_eq!(
        header_value(&head, "access-control-allow-origin"),
        Some("http://localhost:3000")
    );
}
