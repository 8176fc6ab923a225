use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    auth::AuthUser,
    dto::{
        CreateNoteRequest, ErrorResponse, MessageResponse, NoteEnvelope, NoteListResponse,
        NoteResponse, UpdateNoteRequest,
    },
    error::ApiError,
    repository::StoreError,
    service::{NoteService, NoteServiceError},
    state::AppState,
};

mod body;

#[derive(OpenApi)]
#[openapi(
    paths(list_notes, create_note, update_note, delete_note),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        NoteListResponse,
        NoteEnvelope,
        MessageResponse,
        ErrorResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "notes", description = "Per-user notes API")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Reads a leading integer the way a lenient `parseInt` does: optional
/// whitespace and sign, then as many digits as are present.
fn parse_note_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);
    if digits.is_empty() {
        return None;
    }

    trimmed[..sign_len + digits.len()].parse().ok()
}

fn store_failure(action: &str, user: AuthUser, e: &StoreError, message: &'static str) -> Response {
    match e {
        StoreError::NotFound => {
            tracing::warn!("failed to {} for user {}: {}", action, user.id, e);
        }
        _ => tracing::error!("failed to {} for user {}: {}", action, user.id, e),
    }
    ApiError::Internal(message).into_response()
}

#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "Caller's notes, newest first", body = NoteListResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notes"
)]
#[debug_handler(state = AppState)]
pub async fn list_notes(State(service): State<NoteService>, user: AuthUser) -> Response {
    match service.list_notes(user.id).await {
        Ok(notes) => (
            StatusCode::OK,
            Json(NoteListResponse {
                success: true,
                notes,
            }),
        )
            .into_response(),
        Err(e) => store_failure("get notes", user, &e, "Failed to get notes"),
    }
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteEnvelope),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notes"
)]
#[debug_handler(state = AppState)]
pub async fn create_note(
    State(service): State<NoteService>,
    user: AuthUser,
    headers: HeaderMap,
    payload: Bytes,
) -> Response {
    let fields = match body::note_fields(&headers, &payload) {
        Ok(fields) => fields,
        Err(e) => return e.into_response(),
    };

    if fields.title.is_absent() || fields.content.is_absent() {
        return ApiError::MissingFields.into_response();
    }

    let (Ok(title), Ok(content)) = (fields.title.into_text(), fields.content.into_text()) else {
        tracing::warn!("failed to create note for user {}: non-text field", user.id);
        return ApiError::Internal("Failed to create note").into_response();
    };

    let payload = CreateNoteRequest { title, content };

    match service.create_note(user.id, payload).await {
        Ok(note) => (
            StatusCode::CREATED,
            Json(NoteEnvelope {
                success: true,
                message: "Note created successfully".to_string(),
                note,
            }),
        )
            .into_response(),
        Err(NoteServiceError::MissingFields) => ApiError::MissingFields.into_response(),
        Err(NoteServiceError::Store(e)) => {
            store_failure("create note", user, &e, "Failed to create note")
        }
    }
}

/// A note that does not exist or belongs to someone else is reported as a
/// server error, identical to a store failure.
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteEnvelope),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Note not found or internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notes"
)]
#[debug_handler(state = AppState)]
pub async fn update_note(
    State(service): State<NoteService>,
    user: AuthUser,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Bytes,
) -> Response {
    let fields = match body::note_fields(&headers, &payload) {
        Ok(fields) => fields,
        Err(e) => return e.into_response(),
    };

    let Some(id) = parse_note_id(&id) else {
        tracing::warn!("failed to update note for user {}: bad id {:?}", user.id, id);
        return ApiError::Internal("Failed to update note").into_response();
    };

    let (Ok(title), Ok(content)) = (fields.title.into_text(), fields.content.into_text()) else {
        tracing::warn!("failed to update note {} for user {}: non-text field", id, user.id);
        return ApiError::Internal("Failed to update note").into_response();
    };

    let payload = UpdateNoteRequest { title, content };

    match service.update_note(id, user.id, payload).await {
        Ok(note) => (
            StatusCode::OK,
            Json(NoteEnvelope {
                success: true,
                message: "Note updated successfully".to_string(),
                note,
            }),
        )
            .into_response(),
        Err(e) => store_failure("update note", user, &e, "Failed to update note"),
    }
}

/// Same error mapping as [`update_note`].
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Note not found or internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notes"
)]
#[debug_handler(state = AppState)]
pub async fn delete_note(
    State(service): State<NoteService>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_note_id(&id) else {
        tracing::warn!("failed to delete note for user {}: bad id {:?}", user.id, id);
        return ApiError::Internal("Failed to delete note").into_response();
    };

    match service.delete_note(id, user.id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                success: true,
                message: "Note deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => store_failure("delete note", user, &e, "Failed to delete note"),
    }
}
