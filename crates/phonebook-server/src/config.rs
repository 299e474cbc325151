// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    /// Requests running longer than this are cut off with a 504.
    pub request_timeout: Duration,
    /// Origins allowed by the CORS middleware; `*` allows any origin.
    pub cors_allowed_origins: Vec<String>,
    /// Debug-log create/update payloads (the old request logger did this).
    pub log_request_bodies: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            request_timeout: Duration::from_secs(5),
            cors_allowed_origins: vec!["*".to_string()],
            log_request_bodies: false,
        }
    }
}
