// SPDX-License-Identifier: Apache-2.0

//! Domain types for the phonebook: the stored `Person` record, the
//! validated `PersonDraft` accepted on write paths, and the field
//! newtypes with their parse rules.

#![forbid(unsafe_code)]

mod person;

pub use person::{
    ParseError, Person, PersonDraft, PersonId, PersonName, PhoneNumber, NAME_MAX_LEN,
    NAME_MIN_LEN, NUMBER_MAX_LEN, NUMBER_MIN_LEN,
};

pub const CRATE_NAME: &str = "phonebook-model";
