// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, PersonPayloadDto};
use phonebook_model::PersonDraft;

/// Which write path a payload is being validated for; only the failure
/// title differs between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
}

impl WriteKind {
    #[must_use]
    pub fn failure_title(self) -> &'static str {
        match self {
            Self::Create => "Failed to add person to phonebook",
            Self::Update => "Failed to update person to phonebook",
        }
    }
}

/// Validates a create/update payload, collecting every field error into
/// one `validation_failed` response.
pub fn parse_person_payload(
    payload: &PersonPayloadDto,
    kind: WriteKind,
) -> Result<PersonDraft, ApiError> {
    let name = payload.name.as_deref().unwrap_or("");
    let number = payload.number.as_deref().unwrap_or("");
    PersonDraft::parse(name, number).map_err(|errors| {
        ApiError::validation_failed(
            kind.failure_title(),
            errors.iter().map(ToString::to_string).collect(),
        )
    })
}
