use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::entities::{
    action_dependencies, actions,
    actions::{ActionKind, Priority, Status, TimeUnit},
    categories, events, logs, notes, projects,
    recurrences::{self, Frequency},
    steps,
};
use crate::error::{ServiceError, ServiceResult};
use crate::services::derivation;
use crate::services::journal_service;
use crate::services::month_filter::MonthKey;
use crate::services::validation::ValidationService;

const LABEL_MAX: usize = 48;
const SLUG_MAX: usize = 32;
const LOCATION_MAX: usize = 64;

/// Subtype payload for events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    pub location: Option<String>,
    pub departure_time: Option<NaiveTime>,
    #[serde(default)]
    pub send_reminder: bool,
}

/// Subtype payload for recurrent actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrencePayload {
    pub frequency: Frequency,
    #[serde(default)]
    pub active: bool,
    pub until: Option<DateTime<Utc>>,
    pub count: i32,
}

/// Create payload. At most one of `event` / `recurrence` may be given;
/// it fixes the action's kind for good. The name is always derived, the
/// slug only when empty.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAction {
    pub project_id: i32,
    pub label: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    pub deadline: Option<NaiveDate>,
    pub planned_on: Option<DateTime<Utc>>,
    pub description: String,
    pub estimate: Option<i32>,
    pub estimate_unit: Option<TimeUnit>,
    pub duration: Option<i32>,
    pub duration_unit: Option<TimeUnit>,
    pub slug: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<i32>,
    pub event: Option<EventPayload>,
    pub recurrence: Option<RecurrencePayload>,
}

/// Update payload: the full editable field set, as an admin form submit.
/// Kind, name and slug are not in it; they never change after creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAction {
    pub project_id: i32,
    pub label: String,
    pub priority: Priority,
    pub status: Status,
    pub deadline: Option<NaiveDate>,
    pub planned_on: Option<DateTime<Utc>>,
    pub description: String,
    pub estimate: Option<i32>,
    pub estimate_unit: Option<TimeUnit>,
    pub duration: Option<i32>,
    pub duration_unit: Option<TimeUnit>,
    pub event: Option<EventPayload>,
    pub recurrence: Option<RecurrencePayload>,
    pub dependencies: Option<Vec<i32>>,
}

/// Narrowing options for the action list view.
#[derive(Debug, Clone, Default)]
pub struct ActionFilters {
    pub category: Option<i32>,
    pub project: Option<i32>,
    pub deadline_month: Option<String>,
    pub planned_on_month: Option<String>,
    pub estimate_unit: Option<TimeUnit>,
    pub duration_unit: Option<TimeUnit>,
    pub kind: Option<ActionKind>,
    pub search: Option<String>,
}

/// Dependency bookkeeping for one action: outgoing edges classified by
/// the target's status, plus the incoming edge count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencySummary {
    pub open: usize,
    pub dropped: usize,
    pub total: usize,
    pub subordinates: usize,
}

impl DependencySummary {
    pub fn display(&self) -> String {
        format!(
            "{}/{}{}//{}",
            self.open, self.dropped, self.total, self.subordinates
        )
    }
}

/// One row of the action list view.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRow {
    pub id: i32,
    pub project_category: String,
    pub project: String,
    pub kind: ActionKind,
    #[serde(rename = "type")]
    pub type_display: String,
    pub label: String,
    pub name: String,
    pub slug: String,
    pub deadline: Option<NaiveDate>,
    pub planned_on: Option<DateTime<Utc>>,
    pub estimate_label: String,
    pub duration_label: String,
    pub dependency_status: String,
    pub priority: Priority,
    pub priority_label: String,
    pub status: Status,
    pub status_label: String,
}

/// Full detail for one action, subtype payload and children included.
#[derive(Debug, Clone, Serialize)]
pub struct ActionDetail {
    pub action: actions::Model,
    #[serde(rename = "type")]
    pub type_display: String,
    pub estimate_label: String,
    pub duration_label: String,
    pub event: Option<events::Model>,
    pub recurrence: Option<recurrences::Model>,
    pub dependency_ids: Vec<i32>,
    pub subordinate_ids: Vec<i32>,
    pub dependency_status: String,
    pub notes: Vec<notes::Model>,
    pub steps: Vec<steps::Model>,
    pub logs: Vec<logs::Model>,
}

#[derive(Clone)]
pub struct ActionService {
    db: DatabaseConnection,
}

impl ActionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create an action with its subtype payload, dependency edges and
    /// the seeded creation log, all in one transaction.
    pub async fn create(&self, input: NewAction) -> ServiceResult<actions::Model> {
        let label = ValidationService::required_text("label", &input.label, LABEL_MAX)?;
        let description = ValidationService::required_content("description", &input.description)?;
        let supplied_slug =
            ValidationService::optional_text("slug", input.slug.as_deref(), SLUG_MAX)?;
        if let Some(estimate) = input.estimate {
            ValidationService::small_positive("estimate", estimate)?;
        }
        if let Some(duration) = input.duration {
            ValidationService::small_positive("duration", duration)?;
        }
        let kind = resolve_kind(&input.event, &input.recurrence)?;
        let event_payload = validate_event(input.event)?;
        let recurrence_payload = validate_recurrence(input.recurrence)?;

        let txn = self.db.begin().await?;

        let project = projects::Entity::find_by_id(input.project_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::validation("project_id", "unknown project"))?;

        let name = derivation::action_name(input.priority, &project.name, &label);
        let slug = match supplied_slug {
            Some(slug) => slug,
            None => derivation::action_slug(&project.name, &label),
        };
        if slug.is_empty() {
            return Err(ServiceError::validation(
                "slug",
                "cannot be derived from this label",
            ));
        }

        let action = actions::ActiveModel {
            project_id: Set(project.id),
            kind: Set(kind),
            priority: Set(input.priority),
            status: Set(input.status),
            deadline: Set(input.deadline),
            label: Set(label),
            name: Set(name),
            description: Set(description),
            planned_on: Set(input.planned_on),
            estimate: Set(input.estimate),
            estimate_unit: Set(input.estimate_unit),
            duration: Set(input.duration),
            duration_unit: Set(input.duration_unit),
            slug: Set(slug),
            ..Default::default()
        };
        let action = action.insert(&txn).await?;

        if let Some(payload) = event_payload {
            let event = events::ActiveModel {
                action_id: Set(action.id),
                location: Set(payload.location),
                departure_time: Set(payload.departure_time),
                send_reminder: Set(payload.send_reminder),
            };
            event.insert(&txn).await?;
        }
        if let Some(payload) = recurrence_payload {
            let recurrence = recurrences::ActiveModel {
                action_id: Set(action.id),
                frequency: Set(payload.frequency),
                active: Set(payload.active),
                until: Set(payload.until),
                count: Set(payload.count),
            };
            recurrence.insert(&txn).await?;
        }

        replace_dependencies(&txn, action.id, &input.dependencies).await?;
        journal_service::seed_creation_log(&txn, action.id).await?;

        txn.commit().await?;

        info!(action_id = action.id, kind = ?kind, "created action");
        Ok(action)
    }

    /// The admin list view: joined project/category names, display
    /// labels and the dependency status summary for each row.
    pub async fn list(&self, filters: ActionFilters) -> ServiceResult<Vec<ActionRow>> {
        let mut query = actions::Entity::find()
            .join(JoinType::InnerJoin, actions::Relation::Projects.def())
            .join(JoinType::InnerJoin, projects::Relation::Categories.def());

        if let Some(category_id) = filters.category {
            query = query.filter(categories::Column::Id.eq(category_id));
        }
        if let Some(project_id) = filters.project {
            query = query.filter(actions::Column::ProjectId.eq(project_id));
        }
        // An unparseable month value leaves the result set unchanged
        if let Some(key) = filters.deadline_month.as_deref().and_then(MonthKey::parse) {
            if let Some((start, end)) = key.date_bounds() {
                query = query
                    .filter(actions::Column::Deadline.gte(start))
                    .filter(actions::Column::Deadline.lt(end));
            }
        }
        if let Some(key) = filters
            .planned_on_month
            .as_deref()
            .and_then(MonthKey::parse)
        {
            if let Some((start, end)) = key.datetime_bounds() {
                query = query
                    .filter(actions::Column::PlannedOn.gte(start))
                    .filter(actions::Column::PlannedOn.lt(end));
            }
        }
        if let Some(unit) = filters.estimate_unit {
            query = query.filter(actions::Column::EstimateUnit.eq(unit));
        }
        if let Some(unit) = filters.duration_unit {
            query = query.filter(actions::Column::DurationUnit.eq(unit));
        }
        if let Some(kind) = filters.kind {
            query = query.filter(actions::Column::Kind.eq(kind));
        }
        if let Some(q) = filters
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
        {
            query = query.filter(
                Condition::any()
                    .add(categories::Column::Name.contains(q))
                    .add(projects::Column::Name.contains(q))
                    .add(actions::Column::Label.contains(q))
                    .add(actions::Column::Deadline.contains(q))
                    .add(actions::Column::PlannedOn.contains(q)),
            );
        }

        let action_models = query
            .order_by_desc(actions::Column::PlannedOn)
            .order_by_desc(actions::Column::Deadline)
            .order_by_asc(actions::Column::Name)
            .all(&self.db)
            .await?;

        if action_models.is_empty() {
            return Ok(Vec::new());
        }

        let project_ids: Vec<i32> = action_models
            .iter()
            .map(|action| action.project_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let project_rows = projects::Entity::find()
            .filter(projects::Column::Id.is_in(project_ids))
            .all(&self.db)
            .await?;

        let category_ids: Vec<i32> = project_rows
            .iter()
            .map(|project| project.category_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let category_names: HashMap<i32, String> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|category| (category.id, category.name))
            .collect();
        let projects_by_id: HashMap<i32, (String, i32)> = project_rows
            .into_iter()
            .map(|project| (project.id, (project.name, project.category_id)))
            .collect();

        let action_ids: Vec<i32> = action_models.iter().map(|action| action.id).collect();
        let summaries = self.dependency_summaries(&action_ids).await?;

        Ok(action_models
            .into_iter()
            .map(|action| {
                let (project_name, category_id) = projects_by_id
                    .get(&action.project_id)
                    .cloned()
                    .unwrap_or_default();
                let category_name = category_names.get(&category_id).cloned().unwrap_or_default();
                let summary = summaries.get(&action.id).copied().unwrap_or_default();
                let estimate_label = action.estimate_label();
                let duration_label = action.duration_label();
                ActionRow {
                    id: action.id,
                    project_category: category_name,
                    project: project_name,
                    kind: action.kind,
                    type_display: action.kind.display_name().to_string(),
                    label: action.label,
                    name: action.name,
                    slug: action.slug,
                    deadline: action.deadline,
                    planned_on: action.planned_on,
                    estimate_label,
                    duration_label,
                    dependency_status: summary.display(),
                    priority: action.priority,
                    priority_label: action.priority.label().to_string(),
                    status: action.status,
                    status_label: action.status.label().to_string(),
                }
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> ServiceResult<ActionDetail> {
        let action = actions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("action"))?;

        let event = match action.kind {
            ActionKind::Event => events::Entity::find_by_id(action.id).one(&self.db).await?,
            _ => None,
        };
        let recurrence = match action.kind {
            ActionKind::Recurrent => {
                recurrences::Entity::find_by_id(action.id)
                    .one(&self.db)
                    .await?
            }
            _ => None,
        };

        let dependency_ids: Vec<i32> = action_dependencies::Entity::find()
            .filter(action_dependencies::Column::ActionId.eq(action.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|edge| edge.depends_on_id)
            .collect();
        let subordinate_ids: Vec<i32> = action_dependencies::Entity::find()
            .filter(action_dependencies::Column::DependsOnId.eq(action.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|edge| edge.action_id)
            .collect();

        let mut summary = DependencySummary {
            total: dependency_ids.len(),
            subordinates: subordinate_ids.len(),
            ..Default::default()
        };
        if !dependency_ids.is_empty() {
            let targets = actions::Entity::find()
                .filter(actions::Column::Id.is_in(dependency_ids.clone()))
                .all(&self.db)
                .await?;
            for target in targets {
                if target.status.is_open() {
                    summary.open += 1;
                }
                if target.status.is_dropped() {
                    summary.dropped += 1;
                }
            }
        }

        let child_notes = notes::Entity::find()
            .filter(notes::Column::ActionId.eq(action.id))
            .order_by_asc(notes::Column::Number)
            .all(&self.db)
            .await?;
        let child_steps = steps::Entity::find()
            .filter(steps::Column::ActionId.eq(action.id))
            .order_by_asc(steps::Column::PlannedOn)
            .order_by_asc(steps::Column::Id)
            .all(&self.db)
            .await?;
        let child_logs = logs::Entity::find()
            .filter(logs::Column::ActionId.eq(action.id))
            .order_by_asc(logs::Column::Date)
            .order_by_asc(logs::Column::Id)
            .all(&self.db)
            .await?;

        Ok(ActionDetail {
            type_display: action.kind.display_name().to_string(),
            estimate_label: action.estimate_label(),
            duration_label: action.duration_label(),
            action,
            event,
            recurrence,
            dependency_ids,
            subordinate_ids,
            dependency_status: summary.display(),
            notes: child_notes,
            steps: child_steps,
            logs: child_logs,
        })
    }

    /// Apply a full edit. The kind is fixed; a payload for a different
    /// kind is rejected, a payload for the action's own kind updates the
    /// subtype row. Name and slug are never re-derived.
    pub async fn update(&self, id: i32, input: UpdateAction) -> ServiceResult<actions::Model> {
        let label = ValidationService::required_text("label", &input.label, LABEL_MAX)?;
        let description = ValidationService::required_content("description", &input.description)?;
        if let Some(estimate) = input.estimate {
            ValidationService::small_positive("estimate", estimate)?;
        }
        if let Some(duration) = input.duration {
            ValidationService::small_positive("duration", duration)?;
        }
        let event_payload = validate_event(input.event)?;
        let recurrence_payload = validate_recurrence(input.recurrence)?;

        let txn = self.db.begin().await?;

        let action = actions::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("action"))?;

        match action.kind {
            ActionKind::Action => {
                if event_payload.is_some() || recurrence_payload.is_some() {
                    return Err(ServiceError::validation(
                        "kind",
                        "a plain action takes no event or recurrence payload",
                    ));
                }
            }
            ActionKind::Event => {
                if recurrence_payload.is_some() {
                    return Err(ServiceError::validation(
                        "recurrence",
                        "this action is an event",
                    ));
                }
            }
            ActionKind::Recurrent => {
                if event_payload.is_some() {
                    return Err(ServiceError::validation(
                        "event",
                        "this action is a recurrent action",
                    ));
                }
            }
        }

        if input.project_id != action.project_id {
            let known = projects::Entity::find_by_id(input.project_id)
                .one(&txn)
                .await?
                .is_some();
            if !known {
                return Err(ServiceError::validation("project_id", "unknown project"));
            }
        }

        let action_id = action.id;
        let mut active: actions::ActiveModel = action.into();
        active.project_id = Set(input.project_id);
        active.label = Set(label);
        active.priority = Set(input.priority);
        active.status = Set(input.status);
        active.deadline = Set(input.deadline);
        active.planned_on = Set(input.planned_on);
        active.description = Set(description);
        active.estimate = Set(input.estimate);
        active.estimate_unit = Set(input.estimate_unit);
        active.duration = Set(input.duration);
        active.duration_unit = Set(input.duration_unit);
        let updated = active.update(&txn).await?;

        if let Some(payload) = event_payload {
            let event = events::Entity::find_by_id(action_id)
                .one(&txn)
                .await?
                .ok_or(ServiceError::NotFound("event"))?;
            let mut event: events::ActiveModel = event.into();
            event.location = Set(payload.location);
            event.departure_time = Set(payload.departure_time);
            event.send_reminder = Set(payload.send_reminder);
            event.update(&txn).await?;
        }
        if let Some(payload) = recurrence_payload {
            let recurrence = recurrences::Entity::find_by_id(action_id)
                .one(&txn)
                .await?
                .ok_or(ServiceError::NotFound("recurrence"))?;
            let mut recurrence: recurrences::ActiveModel = recurrence.into();
            recurrence.frequency = Set(payload.frequency);
            recurrence.active = Set(payload.active);
            recurrence.until = Set(payload.until);
            recurrence.count = Set(payload.count);
            recurrence.update(&txn).await?;
        }

        if let Some(dependencies) = input.dependencies {
            replace_dependencies(&txn, action_id, &dependencies).await?;
        }

        txn.commit().await?;
        Ok(updated)
    }

    /// Delete the action; subtype payload, edges and children go with it.
    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        let result = actions::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("action"));
        }
        info!(action_id = id, "deleted action");
        Ok(())
    }

    /// Replace the outgoing dependency edge set; returns the new set.
    pub async fn set_dependencies(
        &self,
        id: i32,
        dependency_ids: &[i32],
    ) -> ServiceResult<Vec<i32>> {
        let txn = self.db.begin().await?;

        let known = actions::Entity::find_by_id(id).one(&txn).await?.is_some();
        if !known {
            return Err(ServiceError::NotFound("action"));
        }

        let ids = replace_dependencies(&txn, id, dependency_ids).await?;
        txn.commit().await?;
        Ok(ids)
    }

    /// Batched dependency summaries for a set of actions (one query per
    /// edge direction plus one status lookup, regardless of list size).
    pub async fn dependency_summaries(
        &self,
        action_ids: &[i32],
    ) -> ServiceResult<HashMap<i32, DependencySummary>> {
        let mut summaries: HashMap<i32, DependencySummary> = action_ids
            .iter()
            .map(|&id| (id, DependencySummary::default()))
            .collect();
        if action_ids.is_empty() {
            return Ok(summaries);
        }

        let outgoing = action_dependencies::Entity::find()
            .filter(action_dependencies::Column::ActionId.is_in(action_ids.to_vec()))
            .all(&self.db)
            .await?;
        let incoming = action_dependencies::Entity::find()
            .filter(action_dependencies::Column::DependsOnId.is_in(action_ids.to_vec()))
            .all(&self.db)
            .await?;

        let target_ids: Vec<i32> = outgoing
            .iter()
            .map(|edge| edge.depends_on_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let mut status_by_id: HashMap<i32, Status> = HashMap::new();
        if !target_ids.is_empty() {
            let targets = actions::Entity::find()
                .filter(actions::Column::Id.is_in(target_ids))
                .all(&self.db)
                .await?;
            status_by_id = targets
                .into_iter()
                .map(|target| (target.id, target.status))
                .collect();
        }

        for edge in &outgoing {
            if let Some(summary) = summaries.get_mut(&edge.action_id) {
                summary.total += 1;
                if let Some(status) = status_by_id.get(&edge.depends_on_id) {
                    if status.is_open() {
                        summary.open += 1;
                    }
                    if status.is_dropped() {
                        summary.dropped += 1;
                    }
                }
            }
        }
        for edge in &incoming {
            if let Some(summary) = summaries.get_mut(&edge.depends_on_id) {
                summary.subordinates += 1;
            }
        }

        Ok(summaries)
    }
}

fn resolve_kind(
    event: &Option<EventPayload>,
    recurrence: &Option<RecurrencePayload>,
) -> ServiceResult<ActionKind> {
    match (event.is_some(), recurrence.is_some()) {
        (true, true) => Err(ServiceError::validation(
            "kind",
            "an action cannot be both an event and a recurrent action",
        )),
        (true, false) => Ok(ActionKind::Event),
        (false, true) => Ok(ActionKind::Recurrent),
        (false, false) => Ok(ActionKind::Action),
    }
}

fn validate_event(payload: Option<EventPayload>) -> ServiceResult<Option<EventPayload>> {
    let Some(mut payload) = payload else {
        return Ok(None);
    };
    payload.location =
        ValidationService::optional_text("location", payload.location.as_deref(), LOCATION_MAX)?;
    Ok(Some(payload))
}

fn validate_recurrence(
    payload: Option<RecurrencePayload>,
) -> ServiceResult<Option<RecurrencePayload>> {
    let Some(payload) = payload else {
        return Ok(None);
    };
    ValidationService::small_positive("count", payload.count)?;
    Ok(Some(payload))
}

/// Replace the outgoing edges of an action inside the caller's
/// transaction. Ids are deduplicated and must all exist.
async fn replace_dependencies<C: ConnectionTrait>(
    conn: &C,
    action_id: i32,
    dependency_ids: &[i32],
) -> ServiceResult<Vec<i32>> {
    let mut ids: Vec<i32> = dependency_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    if !ids.is_empty() {
        let known = actions::Entity::find()
            .filter(actions::Column::Id.is_in(ids.clone()))
            .count(conn)
            .await?;
        if known as usize != ids.len() {
            return Err(ServiceError::validation(
                "dependencies",
                "references an unknown action",
            ));
        }
    }

    action_dependencies::Entity::delete_many()
        .filter(action_dependencies::Column::ActionId.eq(action_id))
        .exec(conn)
        .await?;

    if !ids.is_empty() {
        let edges: Vec<action_dependencies::ActiveModel> = ids
            .iter()
            .map(|&depends_on_id| action_dependencies::ActiveModel {
                action_id: Set(action_id),
                depends_on_id: Set(depends_on_id),
            })
            .collect();
        action_dependencies::Entity::insert_many(edges).exec(conn).await?;
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_summary_display_format() {
        let summary = DependencySummary {
            open: 1,
            dropped: 2,
            total: 4,
            subordinates: 3,
        };
        assert_eq!(summary.display(), "1/24//3");
    }

    #[test]
    fn kind_resolution() {
        assert_eq!(resolve_kind(&None, &None).unwrap(), ActionKind::Action);
        assert_eq!(
            resolve_kind(&Some(EventPayload::default()), &None).unwrap(),
            ActionKind::Event
        );
        let recurrence = RecurrencePayload {
            frequency: Frequency::Weekly,
            active: true,
            until: None,
            count: 1,
        };
        assert_eq!(
            resolve_kind(&None, &Some(recurrence.clone())).unwrap(),
            ActionKind::Recurrent
        );
        assert!(resolve_kind(&Some(EventPayload::default()), &Some(recurrence)).is_err());
    }
}
