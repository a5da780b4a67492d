use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::database::entities::actions::{self, ActionKind, TimeUnit};
use crate::error::ServiceError;
use crate::server::app::AppState;
use crate::server::handlers::ApiResult;
use crate::server::permissions::{self, AdminAction, AdminEntity};
use crate::services::month_filter::{self, MonthField, MonthOption};
use crate::services::{
    ActionDetail, ActionFilters, ActionRow, ActionService, NewAction, UpdateAction,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListActionsQuery {
    pub category: Option<i32>,
    pub project: Option<i32>,
    pub deadline_month: Option<String>,
    pub planned_on_month: Option<String>,
    pub estimate_unit: Option<TimeUnit>,
    pub duration_unit: Option<TimeUnit>,
    pub kind: Option<ActionKind>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthsQuery {
    pub field: String,
}

#[derive(Debug, Deserialize)]
pub struct DependenciesRequest {
    pub dependencies: Vec<i32>,
}

pub async fn list_actions(
    State(state): State<AppState>,
    Query(query): Query<ListActionsQuery>,
) -> ApiResult<Json<Vec<ActionRow>>> {
    permissions::require(AdminEntity::Actions, AdminAction::View)?;
    let service = ActionService::new(state.db.clone());
    let filters = ActionFilters {
        category: query.category,
        project: query.project,
        deadline_month: query.deadline_month,
        planned_on_month: query.planned_on_month,
        estimate_unit: query.estimate_unit,
        duration_unit: query.duration_unit,
        kind: query.kind,
        search: query.search,
    };
    let rows = service.list(filters).await?;
    Ok(Json(rows))
}

pub async fn create_action(
    State(state): State<AppState>,
    Json(payload): Json<NewAction>,
) -> ApiResult<Json<actions::Model>> {
    permissions::require(AdminEntity::Actions, AdminAction::Add)?;
    let service = ActionService::new(state.db.clone());
    let action = service.create(payload).await?;
    Ok(Json(action))
}

/// Months available to the list filters, for either date field.
pub async fn list_months(
    State(state): State<AppState>,
    Query(query): Query<MonthsQuery>,
) -> ApiResult<Json<Vec<MonthOption>>> {
    permissions::require(AdminEntity::Actions, AdminAction::View)?;
    let field = MonthField::parse(&query.field)
        .ok_or_else(|| ServiceError::validation("field", "expected deadline or planned_on"))?;
    let months = month_filter::distinct_months(&state.db, field)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(months))
}

pub async fn get_action(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ActionDetail>> {
    permissions::require(AdminEntity::Actions, AdminAction::View)?;
    let service = ActionService::new(state.db.clone());
    let detail = service.get(id).await?;
    Ok(Json(detail))
}

pub async fn update_action(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAction>,
) -> ApiResult<Json<actions::Model>> {
    permissions::require(AdminEntity::Actions, AdminAction::Change)?;
    let service = ActionService::new(state.db.clone());
    let action = service.update(id, payload).await?;
    Ok(Json(action))
}

pub async fn delete_action(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    permissions::require(AdminEntity::Actions, AdminAction::Delete)?;
    let service = ActionService::new(state.db.clone());
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the whole dependency set of an action.
pub async fn set_dependencies(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<DependenciesRequest>,
) -> ApiResult<Json<Vec<i32>>> {
    permissions::require(AdminEntity::Actions, AdminAction::Change)?;
    let service = ActionService::new(state.db.clone());
    let ids = service.set_dependencies(id, &payload.dependencies).await?;
    Ok(Json(ids))
}
