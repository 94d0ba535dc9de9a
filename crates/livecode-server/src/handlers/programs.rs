//! Program source handlers (script, save, list/search).

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::ApiError;
use crate::schema::programs::{ProgramListQuery, ProgramListResponse, SaveProgramResponse};
use crate::state::AppState;

/// Returns the program source as a script body.
///
/// `GET /program/{id}/script.js`
pub async fn script(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let source = state.service.source(&id)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        source,
    ))
}

/// Replaces the program source with the plain-text request body.
///
/// `POST /program/{id}`
pub async fn save(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<SaveProgramResponse>, ApiError> {
    let id = state.service.save(&id, &body)?;
    Ok(Json(SaveProgramResponse { status: "OK", id }))
}

/// Lists all programs, or searches them when `q` is given.
///
/// `GET /programs?q=...`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProgramListQuery>,
) -> Result<Json<ProgramListResponse>, ApiError> {
    let programs = state.service.programs(query.q.as_deref())?;
    Ok(Json(ProgramListResponse { programs }))
}
