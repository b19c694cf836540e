//! Problem REST API handlers
//!
//! Every query is scoped to the caller; another user's problem is reported as
//! not found.

use crate::{
    ApiError, ApiResult, AppState, CreateProblemRequest, CurrentIdentity, MessageResponse,
    NoteDto, NoteListResponse, ProblemDto, ProblemListResponse, ProblemResponse,
};

use pt_core::{Difficulty, Problem};
use pt_db::{NoteRepository, ProblemRepository};

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use log::info;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/problems
pub async fn create_problem(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: Result<Json<CreateProblemRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProblemResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let difficulty = Difficulty::from_str(&req.difficulty)?;

    let mut problem = Problem::new(
        identity.id,
        req.title.trim().to_string(),
        req.description,
        difficulty,
        req.next_review_date,
    );
    if let Some(solved_at) = req.solved_at {
        problem.solved_at = solved_at;
    }
    if let Some(times_solved) = req.times_solved {
        problem.times_solved = times_solved;
    }

    ProblemRepository::new(state.pool.clone()).create(&problem).await?;

    info!("Identity {} created problem {}", identity.id, problem.id);

    Ok((
        StatusCode::CREATED,
        Json(ProblemResponse {
            problem: problem.into(),
        }),
    ))
}

/// GET /api/problems
pub async fn list_problems(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Json<ProblemListResponse>> {
    let problems = ProblemRepository::new(state.pool.clone())
        .find_by_user(identity.id)
        .await?;

    Ok(Json(ProblemListResponse {
        problems: problems.into_iter().map(ProblemDto::from).collect(),
    }))
}

/// GET /api/problems/daily
///
/// Problems whose review date is now or earlier
pub async fn daily_problems(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Json<ProblemListResponse>> {
    let problems = ProblemRepository::new(state.pool.clone())
        .find_due(identity.id, Utc::now())
        .await?;

    Ok(Json(ProblemListResponse {
        problems: problems.into_iter().map(ProblemDto::from).collect(),
    }))
}

/// GET /api/problems/{id}
pub async fn get_problem(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<Json<ProblemResponse>> {
    let problem = find_owned_problem(&state, &id, identity.id).await?;

    Ok(Json(ProblemResponse {
        problem: problem.into(),
    }))
}

/// GET /api/problems/{id}/notes
pub async fn list_problem_notes(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<Json<NoteListResponse>> {
    let problem = find_owned_problem(&state, &id, identity.id).await?;

    let notes = NoteRepository::new(state.pool.clone())
        .find_by_problem(problem.id)
        .await?;

    Ok(Json(NoteListResponse {
        notes: notes.into_iter().map(NoteDto::from).collect(),
    }))
}

/// DELETE /api/problems/{id}
///
/// Notes on the problem go with it (ON DELETE CASCADE).
pub async fn delete_problem(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let problem_id = Uuid::parse_str(&id)?;

    let deleted = ProblemRepository::new(state.pool.clone())
        .delete(problem_id, identity.id)
        .await?;

    if !deleted {
        return Err(ApiError::not_found(format!("Problem {} not found", id)));
    }

    info!("Identity {} deleted problem {}", identity.id, problem_id);

    Ok(Json(MessageResponse::new("Problem deleted")))
}

// =============================================================================
// Helpers
// =============================================================================

async fn find_owned_problem(state: &AppState, id: &str, user_id: Uuid) -> ApiResult<Problem> {
    let problem_id = Uuid::parse_str(id)?;

    ProblemRepository::new(state.pool.clone())
        .find_owned(problem_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Problem {} not found", id)))
}
