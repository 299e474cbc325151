// SPDX-License-Identifier: Apache-2.0

use phonebook_model::Person;
use serde::{Deserialize, Serialize};

/// Inbound create/update payload. Unknown fields are ignored and both
/// fields are optional at the wire level; absence is reported through
/// field validation rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPayloadDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

/// Flat success envelope; absent fields are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persons: Option<Vec<Person>>,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn person(message: impl Into<String>, person: Person) -> Self {
        Self {
            message: Some(message.into()),
            person: Some(person),
            persons: None,
        }
    }

    #[must_use]
    pub fn persons(persons: Vec<Person>) -> Self {
        Self {
            message: None,
            person: None,
            persons: Some(persons),
        }
    }
}
