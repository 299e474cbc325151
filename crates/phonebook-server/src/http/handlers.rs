// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use phonebook_api::{
    map_error, parse_person_payload, ApiError, ApiErrorCode, PersonPayloadDto, ResponseEnvelope,
    WriteKind,
};
use phonebook_model::{PersonDraft, PersonId};
use phonebook_store::StoreError;
use serde_json::json;
use tracing::{debug, error};

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"error": err}))).into_response()
}

fn store_error(err: StoreError, title: &str) -> ApiError {
    match err {
        StoreError::DuplicateName(name) => ApiError::duplicate_name(title, &name),
        StoreError::Backend(reason) => {
            error!("store backend failure: {reason}");
            ApiError::store_unavailable(&reason)
        }
        _ => ApiError::internal("unhandled store error"),
    }
}

fn body_rejection(rejection: &JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large()
    } else {
        ApiError::invalid_body(&rejection.body_text())
    }
}

/// The original's duplicate check: the name may not belong to any entry
/// other than the one being written.
async fn name_taken_by_other(
    state: &AppState,
    draft: &PersonDraft,
    own_id: Option<&PersonId>,
) -> Result<bool, StoreError> {
    let existing = state.store.find_by_name(draft.name.as_str()).await?;
    Ok(match existing {
        Some(person) => own_id != Some(&person.id),
        None => false,
    })
}

pub(crate) async fn landing_handler() -> Html<&'static str> {
    Html("<h1>Hello World!</h1>")
}

pub(crate) async fn healthz_handler() -> Response {
    Json(json!({"status": "ok"})).into_response()
}

pub(crate) async fn info_handler(State(state): State<AppState>) -> Response {
    let count = match state.store.count().await {
        Ok(count) => count,
        Err(e) => return api_error_response(store_error(e, "")),
    };
    let now = chrono::Local::now().format("%d/%m/%Y, %H:%M:%S");
    Html(format!(
        "<p>Phonebook has info for {count} people</p><p>{now}</p>"
    ))
    .into_response()
}

pub(crate) async fn list_persons_handler(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(persons) => Json(ResponseEnvelope::persons(persons)).into_response(),
        Err(e) => api_error_response(store_error(e, "")),
    }
}

pub(crate) async fn get_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = PersonId::parse(&id) else {
        return api_error_response(ApiError::person_not_found(&id));
    };
    match state.store.get(&id).await {
        Ok(Some(person)) => Json(person).into_response(),
        Ok(None) => api_error_response(ApiError::person_not_found(id.as_str())),
        Err(e) => api_error_response(store_error(e, "")),
    }
}

pub(crate) async fn create_person_handler(
    State(state): State<AppState>,
    payload: Result<Json<PersonPayloadDto>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return api_error_response(body_rejection(&rejection)),
    };
    if state.api.log_request_bodies {
        debug!(payload = ?payload, "create person");
    }
    let title = WriteKind::Create.failure_title();
    let draft = match parse_person_payload(&payload, WriteKind::Create) {
        Ok(draft) => draft,
        Err(e) => return api_error_response(e),
    };
    match name_taken_by_other(&state, &draft, None).await {
        Ok(true) => {
            return api_error_response(ApiError::duplicate_name(title, draft.name.as_str()))
        }
        Ok(false) => {}
        Err(e) => return api_error_response(store_error(e, title)),
    }
    match state.store.insert(draft).await {
        Ok(person) => {
            let message =
                format!("Person {} has been successfully added to the phonebook", person.name);
            (
                StatusCode::CREATED,
                Json(ResponseEnvelope::person(message, person)),
            )
                .into_response()
        }
        Err(e) => api_error_response(store_error(e, title)),
    }
}

pub(crate) async fn update_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PersonPayloadDto>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return api_error_response(body_rejection(&rejection)),
    };
    if state.api.log_request_bodies {
        debug!(payload = ?payload, "update person");
    }
    let title = WriteKind::Update.failure_title();
    let draft = match parse_person_payload(&payload, WriteKind::Update) {
        Ok(draft) => draft,
        Err(e) => return api_error_response(e),
    };
    let Ok(id) = PersonId::parse(&id) else {
        return api_error_response(ApiError::person_not_found(draft.name.as_str()));
    };
    match state.store.get(&id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return api_error_response(ApiError::person_not_found(draft.name.as_str()))
        }
        Err(e) => return api_error_response(store_error(e, title)),
    }
    match name_taken_by_other(&state, &draft, Some(&id)).await {
        Ok(true) => {
            return api_error_response(ApiError::duplicate_name(title, draft.name.as_str()))
        }
        Ok(false) => {}
        Err(e) => return api_error_response(store_error(e, title)),
    }
    match state.store.update(&id, draft).await {
        Ok(Some(person)) => {
            let message = format!("Person {} has been updated successfully", person.name);
            Json(ResponseEnvelope::person(message, person)).into_response()
        }
        // The row vanished between the existence check and the write.
        Ok(None) => api_error_response(ApiError::person_not_found(id.as_str())),
        Err(e) => api_error_response(store_error(e, title)),
    }
}

pub(crate) async fn delete_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let not_found = || {
        ApiError::new(
            ApiErrorCode::PersonNotFound,
            "The person to be deleted cannot be found",
            json!({}),
        )
    };
    let Ok(id) = PersonId::parse(&id) else {
        return api_error_response(not_found());
    };
    match state.store.delete(&id).await {
        Ok(Some(person)) => {
            let message =
                format!("Person {} has been removed from the phonebook", person.name);
            Json(ResponseEnvelope::person(message, person)).into_response()
        }
        Ok(None) => api_error_response(not_found()),
        Err(e) => api_error_response(store_error(e, "")),
    }
}
