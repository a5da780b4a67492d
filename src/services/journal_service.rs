use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, Statement,
};

use crate::database::entities::{actions, logs, notes, steps};
use crate::error::{ServiceError, ServiceResult};
use crate::services::validation::ValidationService;

/// Content of the log entry seeded when an action is created.
pub const CREATION_LOG_CONTENT: &str = "Creation of the action";

/// Notes, steps and log entries hanging off an action. Each child type
/// keeps its own per-action sequence: the number is produced by a
/// single aggregate-and-insert statement, so two concurrent creates for
/// the same action can never pick the same value, and the unique
/// (action_id, number) index backs that up.
#[derive(Clone)]
pub struct JournalService {
    db: DatabaseConnection,
}

impl JournalService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require_action(&self, action_id: i32) -> ServiceResult<()> {
        let exists = actions::Entity::find_by_id(action_id)
            .one(&self.db)
            .await?
            .is_some();
        if exists {
            Ok(())
        } else {
            Err(ServiceError::NotFound("action"))
        }
    }

    // Notes

    pub async fn list_notes(&self, action_id: i32) -> ServiceResult<Vec<notes::Model>> {
        self.require_action(action_id).await?;
        Ok(notes::Entity::find()
            .filter(notes::Column::ActionId.eq(action_id))
            .order_by_asc(notes::Column::Number)
            .all(&self.db)
            .await?)
    }

    pub async fn create_note(&self, action_id: i32, content: &str) -> ServiceResult<notes::Model> {
        let content = ValidationService::required_content("content", content)?;
        self.require_action(action_id).await?;

        let id = insert_note_row(&self.db, action_id, &content).await?;
        notes::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("note"))
    }

    /// Updates may change the content but never the number or the
    /// owning action.
    pub async fn update_note(&self, id: i32, content: &str) -> ServiceResult<notes::Model> {
        let content = ValidationService::required_content("content", content)?;
        let note = notes::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("note"))?;

        let mut note: notes::ActiveModel = note.into();
        note.content = Set(content);
        Ok(note.update(&self.db).await?)
    }

    pub async fn delete_note(&self, id: i32) -> ServiceResult<()> {
        let result = notes::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("note"));
        }
        Ok(())
    }

    // Steps

    pub async fn list_steps(&self, action_id: i32) -> ServiceResult<Vec<steps::Model>> {
        self.require_action(action_id).await?;
        Ok(steps::Entity::find()
            .filter(steps::Column::ActionId.eq(action_id))
            .order_by_asc(steps::Column::PlannedOn)
            .order_by_asc(steps::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create_step(
        &self,
        action_id: i32,
        planned_on: Option<DateTime<Utc>>,
        content: &str,
    ) -> ServiceResult<steps::Model> {
        let content = ValidationService::required_content("content", content)?;
        self.require_action(action_id).await?;

        let id = insert_step_row(&self.db, action_id, planned_on, &content).await?;
        steps::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("step"))
    }

    pub async fn update_step(
        &self,
        id: i32,
        planned_on: Option<DateTime<Utc>>,
        content: &str,
    ) -> ServiceResult<steps::Model> {
        let content = ValidationService::required_content("content", content)?;
        let step = steps::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("step"))?;

        let mut step: steps::ActiveModel = step.into();
        step.planned_on = Set(planned_on);
        step.content = Set(content);
        Ok(step.update(&self.db).await?)
    }

    pub async fn delete_step(&self, id: i32) -> ServiceResult<()> {
        let result = steps::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("step"));
        }
        Ok(())
    }

    // Log book

    pub async fn list_logs(&self, action_id: i32) -> ServiceResult<Vec<logs::Model>> {
        self.require_action(action_id).await?;
        Ok(logs::Entity::find()
            .filter(logs::Column::ActionId.eq(action_id))
            .order_by_asc(logs::Column::Date)
            .order_by_asc(logs::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create_log(
        &self,
        action_id: i32,
        date: Option<DateTime<Utc>>,
        content: &str,
    ) -> ServiceResult<logs::Model> {
        let content = ValidationService::required_content("content", content)?;
        self.require_action(action_id).await?;

        let id = insert_log_row(&self.db, action_id, date, &content).await?;
        logs::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("log"))
    }

    pub async fn update_log(
        &self,
        id: i32,
        date: Option<DateTime<Utc>>,
        content: &str,
    ) -> ServiceResult<logs::Model> {
        let content = ValidationService::required_content("content", content)?;
        let log = logs::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("log"))?;

        let mut log: logs::ActiveModel = log.into();
        log.date = Set(date);
        log.content = Set(content);
        Ok(log.update(&self.db).await?)
    }

    pub async fn delete_log(&self, id: i32) -> ServiceResult<()> {
        let result = logs::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("log"));
        }
        Ok(())
    }
}

// The aggregate and the insert run as one statement on purpose: SQLite
// holds the write lock across both, so the next number is race-free.

pub(crate) async fn insert_note_row<C: ConnectionTrait>(
    conn: &C,
    action_id: i32,
    content: &str,
) -> Result<i32, DbErr> {
    let result = conn
        .execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "INSERT INTO notes (action_id, number, content) \
             SELECT ?, COALESCE(MAX(number), 0) + 1, ? FROM notes WHERE action_id = ?",
            [action_id.into(), content.into(), action_id.into()],
        ))
        .await?;
    Ok(result.last_insert_id() as i32)
}

pub(crate) async fn insert_step_row<C: ConnectionTrait>(
    conn: &C,
    action_id: i32,
    planned_on: Option<DateTime<Utc>>,
    content: &str,
) -> Result<i32, DbErr> {
    let result = conn
        .execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "INSERT INTO steps (action_id, number, planned_on, content) \
             SELECT ?, COALESCE(MAX(number), 0) + 1, ?, ? FROM steps WHERE action_id = ?",
            [
                action_id.into(),
                planned_on.into(),
                content.into(),
                action_id.into(),
            ],
        ))
        .await?;
    Ok(result.last_insert_id() as i32)
}

pub(crate) async fn insert_log_row<C: ConnectionTrait>(
    conn: &C,
    action_id: i32,
    date: Option<DateTime<Utc>>,
    content: &str,
) -> Result<i32, DbErr> {
    let result = conn
        .execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "INSERT INTO logs (action_id, number, date, content) \
             SELECT ?, COALESCE(MAX(number), 0) + 1, ?, ? FROM logs WHERE action_id = ?",
            [
                action_id.into(),
                date.into(),
                content.into(),
                action_id.into(),
            ],
        ))
        .await?;
    Ok(result.last_insert_id() as i32)
}

/// Seed the creation entry for a freshly inserted action, inside the
/// caller's transaction.
pub(crate) async fn seed_creation_log<C: ConnectionTrait>(
    conn: &C,
    action_id: i32,
) -> Result<(), DbErr> {
    insert_log_row(conn, action_id, Some(Utc::now()), CREATION_LOG_CONTENT).await?;
    Ok(())
}
