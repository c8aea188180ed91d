//! Notes handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::NoteId;
use domain_notes::Note;

use crate::dto::notes::NoteRequest;
use crate::{error::ApiError, AppState};

/// `GET /notes`, newest first
pub async fn list_notes(State(state): State<AppState>) -> Json<Vec<Note>> {
    Json(state.notes.list())
}

/// `POST /notes`
pub async fn create_note(
    State(state): State<AppState>,
    Json(request): Json<NoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.notes.add(&request.content)?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// `PUT /notes/:id`
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.update(&NoteId::new(id), &request.content)?;
    Ok(Json(note))
}

/// `DELETE /notes/:id`
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.notes.delete(&NoteId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}
