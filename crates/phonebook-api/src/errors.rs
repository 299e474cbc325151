// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    DuplicateName,
    PersonNotFound,
    InvalidBody,
    PayloadTooLarge,
    Timeout,
    StoreUnavailable,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    /// Field validation failed on a create or update. `title` is the
    /// user-facing failure title, `messages` the per-field reasons.
    #[must_use]
    pub fn validation_failed(title: &str, messages: Vec<String>) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            json!({"title": title, "messages": messages}),
        )
    }

    #[must_use]
    pub fn duplicate_name(title: &str, name: &str) -> Self {
        Self::new(
            ApiErrorCode::DuplicateName,
            format!("{name} is already in the phonebook"),
            json!({"title": title, "messages": [format!("{name} is already in the phonebook")]}),
        )
    }

    #[must_use]
    pub fn person_not_found(subject: &str) -> Self {
        Self::new(
            ApiErrorCode::PersonNotFound,
            format!("Person {subject} not found"),
            json!({"messages": [format!("Person {subject} not found")]}),
        )
    }

    #[must_use]
    pub fn invalid_body(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidBody,
            "invalid request body",
            json!({"reason": reason}),
        )
    }

    #[must_use]
    pub fn payload_too_large() -> Self {
        Self::new(
            ApiErrorCode::PayloadTooLarge,
            "request body too large",
            json!({}),
        )
    }

    #[must_use]
    pub fn timeout() -> Self {
        Self::new(ApiErrorCode::Timeout, "request timed out", json!({}))
    }

    #[must_use]
    pub fn internal(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::Internal,
            "internal error",
            json!({"reason": reason}),
        )
    }

    #[must_use]
    pub fn store_unavailable(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::StoreUnavailable,
            "store unavailable",
            json!({"reason": reason}),
        )
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de>>() {}
    assert_traits::<ApiErrorCode>();
    assert_traits::<ApiError>();
};
