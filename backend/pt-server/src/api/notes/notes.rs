//! Note REST API handlers

use crate::{
    ApiError, ApiResult, AppState, CreateNoteRequest, CurrentIdentity, NoteResponse,
    UpdateNoteRequest,
};

use pt_core::Note;
use pt_db::{NoteRepository, ProblemRepository};

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use log::info;
use uuid::Uuid;

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    // The problem must exist and belong to the caller
    ProblemRepository::new(state.pool.clone())
        .find_owned(req.problem_id, identity.id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Problem {} not found", req.problem_id)))?;

    let note = Note::new(identity.id, req.problem_id, req.content);
    NoteRepository::new(state.pool.clone()).create(&note).await?;

    info!("Identity {} added note {}", identity.id, note.id);

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse { note: note.into() }),
    ))
}

/// PUT /api/notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> ApiResult<Json<NoteResponse>> {
    let note_id = Uuid::parse_str(&id)?;
    let Json(req) = payload?;
    req.validate()?;

    let repo = NoteRepository::new(state.pool.clone());
    let mut note = repo
        .find_owned(note_id, identity.id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;

    note.edit(req.content);
    repo.update(&note).await?;

    Ok(Json(NoteResponse { note: note.into() }))
}
