use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::database::entities::categories;
use crate::server::app::AppState;
use crate::server::handlers::ApiResult;
use crate::server::permissions::{self, AdminAction, AdminEntity};
use crate::services::{CategoryRow, CategoryService};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListCategoriesQuery {
    pub search: Option<String>,
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> ApiResult<Json<Vec<CategoryRow>>> {
    permissions::require(AdminEntity::Categories, AdminAction::View)?;
    let service = CategoryService::new(state.db.clone());
    let rows = service.list(query.search.as_deref()).await?;
    Ok(Json(rows))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> ApiResult<Json<categories::Model>> {
    permissions::require(AdminEntity::Categories, AdminAction::Add)?;
    let service = CategoryService::new(state.db.clone());
    let category = service.create(&payload.name, payload.slug.as_deref()).await?;
    Ok(Json(category))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<categories::Model>> {
    permissions::require(AdminEntity::Categories, AdminAction::View)?;
    let service = CategoryService::new(state.db.clone());
    let category = service.get(id).await?;
    Ok(Json(category))
}

// Categories are append-only reference data; the policy check rejects
// edits and deletions before anything is looked up.

pub async fn update_category(Path(_id): Path<i32>) -> ApiResult<StatusCode> {
    permissions::require(AdminEntity::Categories, AdminAction::Change)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_category(Path(_id): Path<i32>) -> ApiResult<StatusCode> {
    permissions::require(AdminEntity::Categories, AdminAction::Delete)?;
    Ok(StatusCode::NO_CONTENT)
}
