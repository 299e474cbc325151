// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

fn origin_allowed(state: &AppState, origin: &str) -> bool {
    state
        .api
        .cors_allowed_origins
        .iter()
        .any(|allowed| allowed == "*" || allowed == origin)
}

fn put_cors_headers(resp: &mut Response, origin: &str) {
    if let Ok(value) = HeaderValue::from_str(origin) {
        resp.headers_mut().insert("access-control-allow-origin", value);
    }
    resp.headers_mut().insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET,POST,PUT,DELETE,OPTIONS"),
    );
    resp.headers_mut().insert(
        "access-control-allow-headers",
        HeaderValue::from_static("content-type"),
    );
}

pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        if let Some(origin) = origin {
            if origin_allowed(&state, &origin) {
                put_cors_headers(&mut resp, &origin);
            }
        }
        put_vary_origin(&mut resp);
        return resp;
    }

    let mut resp = next.run(req).await;
    if let Some(origin) = origin {
        if origin_allowed(&state, &origin) {
            put_cors_headers(&mut resp, &origin);
        }
    }
    put_vary_origin(&mut resp);
    resp
}

/// The allow-origin value depends on the caller, so caches must key on it.
fn put_vary_origin(resp: &mut Response) {
    resp.headers_mut()
        .insert("vary", HeaderValue::from_static("origin"));
}
