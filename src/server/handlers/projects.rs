use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::database::entities::projects;
use crate::server::app::AppState;
use crate::server::handlers::ApiResult;
use crate::server::permissions::{self, AdminAction, AdminEntity};
use crate::services::{ProjectRow, ProjectService};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub category_id: i32,
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    pub search: Option<String>,
}

pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> ApiResult<Json<Vec<ProjectRow>>> {
    permissions::require(AdminEntity::Projects, AdminAction::View)?;
    let service = ProjectService::new(state.db.clone());
    let rows = service.list(query.search.as_deref()).await?;
    Ok(Json(rows))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> ApiResult<Json<projects::Model>> {
    permissions::require(AdminEntity::Projects, AdminAction::Add)?;
    let service = ProjectService::new(state.db.clone());
    let project = service
        .create(payload.category_id, &payload.name, payload.slug.as_deref())
        .await?;
    Ok(Json(project))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<projects::Model>> {
    permissions::require(AdminEntity::Projects, AdminAction::View)?;
    let service = ProjectService::new(state.db.clone());
    let project = service.get(id).await?;
    Ok(Json(project))
}

// Projects are append-only reference data, same as categories.

pub async fn update_project(Path(_id): Path<i32>) -> ApiResult<StatusCode> {
    permissions::require(AdminEntity::Projects, AdminAction::Change)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_project(Path(_id): Path<i32>) -> ApiResult<StatusCode> {
    permissions::require(AdminEntity::Projects, AdminAction::Delete)?;
    Ok(StatusCode::NO_CONTENT)
}
