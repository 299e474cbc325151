// SPDX-License-Identifier: Apache-2.0

//! Wire contract for the phonebook API.
//!
//! Success responses use a flat envelope (`message` / `person` / `persons`,
//! absent fields omitted). Failures use `{"error": {code, message, details}}`
//! with the status code derived from the error code via [`map_error`].

#![forbid(unsafe_code)]

mod dto;
mod error_mapping;
mod errors;
mod params;

pub use dto::{PersonPayloadDto, ResponseEnvelope};
pub use error_mapping::{map_error, ApiErrorMapping};
pub use errors::{ApiError, ApiErrorCode};
pub use params::{parse_person_payload, WriteKind};

pub const CRATE_NAME: &str = "phonebook-api";
