// SPDX-License-Identifier: Apache-2.0

//! HTTP server for the phonebook REST API.
//!
//! [`build_router`] wires the five person endpoints plus the landing,
//! `/info`, and `/healthz` surfaces over any [`PersonStore`] backend.

#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use phonebook_store::PersonStore;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod http;
mod middleware;

pub use config::ApiConfig;
pub use phonebook_store::{MemoryStore, SqliteStore};

pub const CRATE_NAME: &str = "phonebook-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PersonStore>,
    pub request_id_seed: Arc<AtomicU64>,
    pub api: ApiConfig,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<dyn PersonStore>, api: ApiConfig) -> Self {
        Self {
            store,
            request_id_seed: Arc::new(AtomicU64::new(1)),
            api,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::landing_handler))
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/info", get(http::handlers::info_handler))
        .route(
            "/api/persons",
            get(http::handlers::list_persons_handler)
                .post(http::handlers::create_person_handler),
        )
        .route(
            "/api/persons/:id",
            get(http::handlers::get_person_handler)
                .put(http::handlers::update_person_handler)
                .delete(http::handlers::delete_person_handler),
        )
        .layer(from_fn_with_state(state.clone(), middleware::cors::cors_middleware))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::timeout::timeout_middleware,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
