// SPDX-License-Identifier: Apache-2.0

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 256;
pub const NUMBER_MIN_LEN: usize = 8;
pub const NUMBER_MAX_LEN: usize = 64;

/// Unanchored: a number is valid when it contains this pattern anywhere.
const NUMBER_PATTERN: &str = r"\d{2,3}-\d{7,8}";

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("static number pattern"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Required(&'static str),
    TooShort(&'static str, usize),
    TooLong(&'static str, usize),
    InvalidNumber(String),
    InvalidId(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{field} is required"),
            Self::TooShort(field, min) => {
                write!(f, "{field} minimum length is {min} characters")
            }
            Self::TooLong(field, max) => write!(f, "{field} exceeds max length {max}"),
            Self::InvalidNumber(value) => write!(f, "{value} is not a valid number!"),
            Self::InvalidId(value) => write!(f, "{value} is not a valid person id"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Store-assigned identifier, a decimal string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct PersonId(String);

impl PersonId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidId(input.to_string()));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn from_u64(id: u64) -> Self {
        Self(id.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, used by stores that key rows by integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A name accepted on a write path: trimmed, non-empty, within length bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Required("Name"));
        }
        // Both bounds count characters, not bytes.
        let length = trimmed.chars().count();
        if length < NAME_MIN_LEN {
            return Err(ParseError::TooShort("Name", NAME_MIN_LEN));
        }
        if length > NAME_MAX_LEN {
            return Err(ParseError::TooLong("Name", NAME_MAX_LEN));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A phone number accepted on a write path: trimmed, non-empty, within
/// length bounds, and containing a `\d{2,3}-\d{7,8}` run somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Required("Number"));
        }
        let length = trimmed.chars().count();
        if length < NUMBER_MIN_LEN {
            return Err(ParseError::TooShort("Number", NUMBER_MIN_LEN));
        }
        if length > NUMBER_MAX_LEN {
            return Err(ParseError::TooLong("Number", NUMBER_MAX_LEN));
        }
        if !number_pattern().is_match(trimmed) {
            return Err(ParseError::InvalidNumber(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored phonebook entry. Name and number are kept as raw strings:
/// rows written before the current validation rules stay readable, and
/// validation applies only when an entry is created or updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub number: String,
}

/// A validated name/number pair, ready to be inserted or to replace an
/// existing entry. Field errors are collected across both fields so a
/// request missing both name and number reports both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: PersonName,
    pub number: PhoneNumber,
}

impl PersonDraft {
    pub fn parse(name: &str, number: &str) -> Result<Self, Vec<ParseError>> {
        let mut errors = Vec::new();
        let name = match PersonName::parse(name) {
            Ok(name) => Some(name),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let number = match PhoneNumber::parse(number) {
            Ok(number) => Some(number),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        match (name, number) {
            (Some(name), Some(number)) => Ok(Self { name, number }),
            _ => Err(errors),
        }
    }

    #[must_use]
    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            name: self.name.0,
            number: self.number.0,
        }
    }
}
