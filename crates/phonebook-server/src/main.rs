// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use phonebook_server::{build_router, ApiConfig, AppState, MemoryStore, SqliteStore};
use phonebook_store::PersonStore;
use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_origin_list(name: &str) -> Vec<String> {
    let raw = env::var(name).unwrap_or_default();
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("PHONEBOOK_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn open_store() -> Result<Arc<dyn PersonStore>, String> {
    let db = env::var("PHONEBOOK_DB_PATH").unwrap_or_else(|_| "phonebook.sqlite".to_string());
    if db == "memory:" {
        return Ok(Arc::new(MemoryStore::demo()));
    }
    let store =
        SqliteStore::open(Path::new(&db)).map_err(|e| format!("open store at {db}: {e}"))?;
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let api = ApiConfig {
        max_body_bytes: env_usize("PHONEBOOK_MAX_BODY_BYTES", 16 * 1024),
        request_timeout: Duration::from_millis(env_u64("PHONEBOOK_REQUEST_TIMEOUT_MS", 5000)),
        cors_allowed_origins: env_origin_list("PHONEBOOK_CORS_ORIGINS"),
        log_request_bodies: env_bool("PHONEBOOK_LOG_REQUEST_BODIES", false),
    };
    let store = open_store()?;
    info!("phonebook store backend: {}", store.backend_tag());

    let state = AppState::with_config(store, api);
    let app = build_router(state);

    let port = env_u16("PORT", 3001);
    let bind_addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr}: {e}"))?;
    info!("phonebook-server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
