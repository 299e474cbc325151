// SPDX-License-Identifier: Apache-2.0

use crate::http::handlers::api_error_response;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use phonebook_api::ApiError;
use tokio::time::timeout;
use tracing::warn;

pub(crate) async fn timeout_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let route = request.uri().path().to_string();
    match timeout(state.api.request_timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!("request to {route} timed out");
            api_error_response(ApiError::timeout())
        }
    }
}
