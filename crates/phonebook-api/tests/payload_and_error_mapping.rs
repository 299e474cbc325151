// SPDX-License-Identifier: Apache-2.0

use phonebook_api::{
    map_error, parse_person_payload, ApiError, ApiErrorCode, PersonPayloadDto, ResponseEnvelope,
    WriteKind,
};
use phonebook_model::{PersonDraft, PersonId};

fn payload(name: Option<&str>, number: Option<&str>) -> PersonPayloadDto {
    PersonPayloadDto {
        name: name.map(str::to_string),
        number: number.map(str::to_string),
    }
}

#[test]
fn payload_validation_missing_fields_collect_both_messages() {
    let err = parse_person_payload(&payload(None, None), WriteKind::Create)
        .expect_err("empty payload");
    assert_eq!(err.code, ApiErrorCode::ValidationFailed);
    assert_eq!(
        err.details["title"],
        "Failed to add person to phonebook"
    );
    assert_eq!(
        err.details["messages"],
        serde_json::json!(["Name is required", "Number is required"])
    );
}

#[test]
fn payload_validation_update_uses_the_update_title() {
    let err = parse_person_payload(&payload(Some("Al"), Some("12-1234567")), WriteKind::Update)
        .expect_err("short name");
    assert_eq!(
        err.details["title"],
        "Failed to update person to phonebook"
    );
    assert_eq!(
        err.details["messages"],
        serde_json::json!(["Name minimum length is 3 characters"])
    );
}

#[test]
fn payload_validation_accepts_a_well_formed_person() {
    let draft = parse_person_payload(
        &payload(Some(" Ada Lovelace "), Some("39-44-5323523")),
        WriteKind::Create,
    )
    .expect("valid payload");
    assert_eq!(draft.name.as_str(), "Ada Lovelace");
}

#[test]
fn payload_ignores_unknown_wire_fields() {
    let dto: PersonPayloadDto = serde_json::from_str(
        r#"{"name":"Ada Lovelace","number":"39-44-5323523","id":"9","extra":true}"#,
    )
    .expect("payload with extra fields");
    assert_eq!(dto.name.as_deref(), Some("Ada Lovelace"));
}

#[test]
fn error_codes_map_to_the_rest_status_contract() {
    let cases = [
        (ApiError::validation_failed("t", Vec::new()), 400),
        (ApiError::duplicate_name("t", "Ada Lovelace"), 400),
        (ApiError::invalid_body("not json"), 400),
        (ApiError::person_not_found("Ada Lovelace"), 404),
        (ApiError::payload_too_large(), 413),
        (ApiError::timeout(), 504),
        (ApiError::store_unavailable("down"), 503),
        (ApiError::internal("boom"), 500),
    ];
    for (error, expected) in cases {
        assert_eq!(map_error(&error).status_code, expected, "{:?}", error.code);
    }
}

#[test]
fn error_codes_serialize_snake_case() {
    let err = ApiError::duplicate_name("t", "Ada Lovelace");
    let json = serde_json::to_value(&err).expect("error json");
    assert_eq!(json["code"], "duplicate_name");
    assert_eq!(json["message"], "Ada Lovelace is already in the phonebook");
}

#[test]
fn envelope_omits_absent_fields() {
    let person = PersonDraft::parse("Ada Lovelace", "39-44-5323523")
        .expect("draft")
        .into_person(PersonId::from_u64(2));
    let json = serde_json::to_value(ResponseEnvelope::person("added", person)).expect("envelope");
    assert_eq!(json["message"], "added");
    assert!(json.get("persons").is_none());

    let json = serde_json::to_value(ResponseEnvelope::persons(Vec::new())).expect("envelope");
    assert!(json.get("message").is_none());
    assert_eq!(json["persons"], serde_json::json!([]));
}
