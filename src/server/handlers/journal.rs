use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::database::entities::{logs, notes, steps};
use crate::server::app::AppState;
use crate::server::handlers::ApiResult;
use crate::server::permissions::{self, AdminAction, AdminEntity};
use crate::services::JournalService;

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub planned_on: Option<DateTime<Utc>>,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct LogRequest {
    pub date: Option<DateTime<Utc>>,
    pub content: String,
}

// Notes

pub async fn list_notes(
    State(state): State<AppState>,
    Path(action_id): Path<i32>,
) -> ApiResult<Json<Vec<notes::Model>>> {
    permissions::require(AdminEntity::Notes, AdminAction::View)?;
    let service = JournalService::new(state.db.clone());
    let rows = service.list_notes(action_id).await?;
    Ok(Json(rows))
}

pub async fn create_note(
    State(state): State<AppState>,
    Path(action_id): Path<i32>,
    Json(payload): Json<NoteRequest>,
) -> ApiResult<Json<notes::Model>> {
    permissions::require(AdminEntity::Notes, AdminAction::Add)?;
    let service = JournalService::new(state.db.clone());
    let note = service.create_note(action_id, &payload.content).await?;
    Ok(Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<NoteRequest>,
) -> ApiResult<Json<notes::Model>> {
    permissions::require(AdminEntity::Notes, AdminAction::Change)?;
    let service = JournalService::new(state.db.clone());
    let note = service.update_note(id, &payload.content).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    permissions::require(AdminEntity::Notes, AdminAction::Delete)?;
    let service = JournalService::new(state.db.clone());
    service.delete_note(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Steps

pub async fn list_steps(
    State(state): State<AppState>,
    Path(action_id): Path<i32>,
) -> ApiResult<Json<Vec<steps::Model>>> {
    permissions::require(AdminEntity::Steps, AdminAction::View)?;
    let service = JournalService::new(state.db.clone());
    let rows = service.list_steps(action_id).await?;
    Ok(Json(rows))
}

pub async fn create_step(
    State(state): State<AppState>,
    Path(action_id): Path<i32>,
    Json(payload): Json<StepRequest>,
) -> ApiResult<Json<steps::Model>> {
    permissions::require(AdminEntity::Steps, AdminAction::Add)?;
    let service = JournalService::new(state.db.clone());
    let step = service
        .create_step(action_id, payload.planned_on, &payload.content)
        .await?;
    Ok(Json(step))
}

pub async fn update_step(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<StepRequest>,
) -> ApiResult<Json<steps::Model>> {
    permissions::require(AdminEntity::Steps, AdminAction::Change)?;
    let service = JournalService::new(state.db.clone());
    let step = service
        .update_step(id, payload.planned_on, &payload.content)
        .await?;
    Ok(Json(step))
}

pub async fn delete_step(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    permissions::require(AdminEntity::Steps, AdminAction::Delete)?;
    let service = JournalService::new(state.db.clone());
    service.delete_step(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Log book

pub async fn list_logs(
    State(state): State<AppState>,
    Path(action_id): Path<i32>,
) -> ApiResult<Json<Vec<logs::Model>>> {
    permissions::require(AdminEntity::Logs, AdminAction::View)?;
    let service = JournalService::new(state.db.clone());
    let rows = service.list_logs(action_id).await?;
    Ok(Json(rows))
}

pub async fn create_log(
    State(state): State<AppState>,
    Path(action_id): Path<i32>,
    Json(payload): Json<LogRequest>,
) -> ApiResult<Json<logs::Model>> {
    permissions::require(AdminEntity::Logs, AdminAction::Add)?;
    let service = JournalService::new(state.db.clone());
    let log = service
        .create_log(action_id, payload.date, &payload.content)
        .await?;
    Ok(Json(log))
}

pub async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LogRequest>,
) -> ApiResult<Json<logs::Model>> {
    permissions::require(AdminEntity::Logs, AdminAction::Change)?;
    let service = JournalService::new(state.db.clone());
    let log = service
        .update_log(id, payload.date, &payload.content)
        .await?;
    Ok(Json(log))
}

pub async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    permissions::require(AdminEntity::Logs, AdminAction::Delete)?;
    let service = JournalService::new(state.db.clone());
    service.delete_log(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
