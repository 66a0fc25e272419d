//! Handlers for the `/programs` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use programs_core::program::UpdateProgramDetails;
use programs_core::types::DbId;
use programs_db::models::program::ProgramSummary;
use programs_db::models::program_image::ProgramImage;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppMultipart, AppPath};
use crate::response::DataResponse;
use crate::services::program::{ProgramDetail, ProgramSchedule};
use crate::state::AppState;
use crate::upload::{enrollment_from_fields, read_form};

/// Payload returned after enrollment.
#[derive(Debug, Serialize)]
pub struct EnrolledProgram {
    pub program_id: DbId,
}

/// Payload for the chat-link lookup.
#[derive(Debug, Serialize)]
pub struct ChatLink {
    pub chat_link: String,
}

/// POST /api/v1/programs
///
/// Multipart form with host and program fields plus zero or more `images`.
pub async fn enroll(
    State(state): State<AppState>,
    AppMultipart(mut multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<DataResponse<EnrolledProgram>>)> {
    let mut form = read_form(&mut multipart, &state.config).await?;
    let input = enrollment_from_fields(&mut form.fields)?;

    let program_id = state.programs.enroll(input, form.images).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: EnrolledProgram { program_id },
        }),
    ))
}

/// GET /api/v1/programs
///
/// Available programs, those with a cover image first, newest first within
/// each group.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProgramSummary>>>> {
    let programs = state.programs.list_available().await?;
    Ok(Json(DataResponse { data: programs }))
}

/// GET /api/v1/programs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ProgramDetail>>> {
    let detail = state.programs.detail(id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/programs/{id}/date
pub async fn available_date(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ProgramSchedule>>> {
    let schedule = state.programs.available_date(id).await?;
    Ok(Json(DataResponse { data: schedule }))
}

/// GET /api/v1/programs/{id}/chat-link
pub async fn chat_link(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ChatLink>>> {
    let chat_link = state.programs.chat_link(id).await?;
    Ok(Json(DataResponse {
        data: ChatLink { chat_link },
    }))
}

/// POST /api/v1/programs/{id}/images
///
/// Multipart form with one or more `images`, appended after the current
/// last gallery slot.
pub async fn add_images(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppMultipart(mut multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<ProgramImage>>>)> {
    let form = read_form(&mut multipart, &state.config).await?;
    let created = state.programs.add_images(id, form.images).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/programs/{id}/details
pub async fn update_details(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProgramDetails>,
) -> AppResult<StatusCode> {
    state.programs.update_details(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}
