//! Axum route handlers for the Resume API. All routes sit behind `require_api_key`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::resume::{ParseResumeRequest, Resume, ResumeUpdate};
use crate::resumes::ingest::{ingest_resume, presign_upload, IngestReceipt, UploadUrl};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadUrlQuery {
    pub filename: Option<String>,
}

/// POST /api/v1/resumes
///
/// Asks the parser to extract the referenced upload and stores the result.
pub async fn handle_ingest(
    State(state): State<AppState>,
    payload: Result<Json<ParseResumeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestReceipt>), AppError> {
    let Json(request) = payload?;
    let file_name = request.file_name.unwrap_or_default();

    let receipt = ingest_resume(
        state.parser.as_ref(),
        state.resumes.as_ref(),
        state.config.parser_token(),
        &file_name,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /api/v1/resumes
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(state.resumes.list().await?))
}

/// GET /api/v1/resumes/latest
pub async fn handle_latest(State(state): State<AppState>) -> Result<Json<Resume>, AppError> {
    Ok(Json(state.resumes.latest().await?))
}

/// GET /api/v1/resumes/upload-url?filename=
pub async fn handle_upload_url(
    State(state): State<AppState>,
    Query(query): Query<UploadUrlQuery>,
) -> Result<Json<UploadUrl>, AppError> {
    let filename = query.filename.unwrap_or_default();
    Ok(Json(presign_upload(&state.storage, &filename).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Resume>, AppError> {
    let Path(id) = path?;
    Ok(Json(state.resumes.get(id).await?))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ResumeUpdate>, JsonRejection>,
) -> Result<Json<Resume>, AppError> {
    let Path(id) = path?;
    let existing = state.resumes.get(id).await?;
    let Json(update) = payload?;

    let updated = state.resumes.update(&update.apply_to(existing)).await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.resumes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
