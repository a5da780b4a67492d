//! Database functionality tests
//!
//! Tests for migrations, referential integrity and the sequence number
//! constraints backing the journal tables.

use actiondesk::database::entities::*;
use actiondesk::database::migrations::Migrator;
use actiondesk::database::setup_database;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;
use tempfile::NamedTempFile;

/// Create a test database connection with migrations
async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

async fn seed_category(db: &DatabaseConnection, name: &str, slug: &str) -> Result<categories::Model> {
    let category = categories::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        ..Default::default()
    };
    Ok(category.insert(db).await?)
}

async fn seed_project(
    db: &DatabaseConnection,
    category_id: i32,
    name: &str,
    slug: &str,
) -> Result<projects::Model> {
    let project = projects::ActiveModel {
        category_id: Set(category_id),
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        ..Default::default()
    };
    Ok(project.insert(db).await?)
}

async fn seed_action(
    db: &DatabaseConnection,
    project_id: i32,
    kind: actions::ActionKind,
    slug: &str,
) -> Result<actions::Model> {
    let action = actions::ActiveModel {
        project_id: Set(project_id),
        kind: Set(kind),
        priority: Set(actions::Priority::Regular),
        status: Set(actions::Status::Fuzzy),
        label: Set("Test label".to_string()),
        name: Set(format!("⇅ Test – {}", slug)),
        description: Set("test".to_string()),
        slug: Set(slug.to_string()),
        ..Default::default()
    };
    Ok(action.insert(db).await?)
}

#[tokio::test]
async fn test_database_migrations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Verify all tables exist by attempting to query them
    assert_eq!(categories::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(projects::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(actions::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(events::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(recurrences::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(action_dependencies::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(notes::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(steps::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(logs::Entity::find().all(&db).await?.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_migrations_round_trip() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Down then up again must leave a usable schema
    Migrator::down(&db, None).await?;
    Migrator::up(&db, None).await?;

    assert_eq!(actions::Entity::find().all(&db).await?.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_reference_data_is_protected() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let category = seed_category(&db, "Personal", "personal").await?;
    let project = seed_project(&db, category.id, "Home", "personal__home").await?;
    seed_action(&db, project.id, actions::ActionKind::Action, "home__task").await?;

    // A category with projects cannot be deleted
    let result = categories::Entity::delete_by_id(category.id).exec(&db).await;
    assert!(result.is_err());

    // A project with actions cannot be deleted either
    let result = projects::Entity::delete_by_id(project.id).exec(&db).await;
    assert!(result.is_err());

    // Everything is still there
    assert_eq!(categories::Entity::find().all(&db).await?.len(), 1);
    assert_eq!(projects::Entity::find().all(&db).await?.len(), 1);
    assert_eq!(actions::Entity::find().all(&db).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_action_delete_cascades_to_children() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let category = seed_category(&db, "Personal", "personal").await?;
    let project = seed_project(&db, category.id, "Home", "personal__home").await?;
    let action = seed_action(&db, project.id, actions::ActionKind::Event, "home__dentist").await?;
    let other = seed_action(&db, project.id, actions::ActionKind::Action, "home__other").await?;

    // Subtype payload sharing the action's primary key
    events::ActiveModel {
        action_id: Set(action.id),
        location: Set(Some("Main St 1".to_string())),
        departure_time: Set(None),
        send_reminder: Set(false),
    }
    .insert(&db)
    .await?;

    // Journal rows and a dependency edge in both directions
    notes::ActiveModel {
        action_id: Set(action.id),
        number: Set(1),
        content: Set("note".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    logs::ActiveModel {
        action_id: Set(action.id),
        number: Set(1),
        date: Set(None),
        content: Set("log".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    action_dependencies::ActiveModel {
        action_id: Set(action.id),
        depends_on_id: Set(other.id),
    }
    .insert(&db)
    .await?;
    action_dependencies::ActiveModel {
        action_id: Set(other.id),
        depends_on_id: Set(action.id),
    }
    .insert(&db)
    .await?;

    actions::Entity::delete_by_id(action.id).exec(&db).await?;

    assert!(events::Entity::find_by_id(action.id).one(&db).await?.is_none());
    assert_eq!(
        notes::Entity::find()
            .filter(notes::Column::ActionId.eq(action.id))
            .all(&db)
            .await?
            .len(),
        0
    );
    assert_eq!(
        logs::Entity::find()
            .filter(logs::Column::ActionId.eq(action.id))
            .all(&db)
            .await?
            .len(),
        0
    );
    // Edges disappear regardless of direction
    assert_eq!(action_dependencies::Entity::find().all(&db).await?.len(), 0);

    // The other action survives
    assert!(actions::Entity::find_by_id(other.id).one(&db).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_sequence_numbers_are_unique_per_action() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let category = seed_category(&db, "Personal", "personal").await?;
    let project = seed_project(&db, category.id, "Home", "personal__home").await?;
    let action = seed_action(&db, project.id, actions::ActionKind::Action, "home__task").await?;
    let other = seed_action(&db, project.id, actions::ActionKind::Action, "home__other").await?;

    notes::ActiveModel {
        action_id: Set(action.id),
        number: Set(1),
        content: Set("first".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    // Same number for the same action is rejected
    let duplicate = notes::ActiveModel {
        action_id: Set(action.id),
        number: Set(1),
        content: Set("duplicate".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await;
    assert!(duplicate.is_err());

    // Same number under a different action is fine
    notes::ActiveModel {
        action_id: Set(other.id),
        number: Set(1),
        content: Set("unrelated".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    // And so is the same number in a different child table
    steps::ActiveModel {
        action_id: Set(action.id),
        number: Set(1),
        planned_on: Set(None),
        content: Set("step".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_dependency_edges_are_unique() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let category = seed_category(&db, "Personal", "personal").await?;
    let project = seed_project(&db, category.id, "Home", "personal__home").await?;
    let action = seed_action(&db, project.id, actions::ActionKind::Action, "home__a").await?;
    let prerequisite = seed_action(&db, project.id, actions::ActionKind::Action, "home__b").await?;

    action_dependencies::ActiveModel {
        action_id: Set(action.id),
        depends_on_id: Set(prerequisite.id),
    }
    .insert(&db)
    .await?;

    // The composite primary key rejects the same edge twice
    let duplicate = action_dependencies::ActiveModel {
        action_id: Set(action.id),
        depends_on_id: Set(prerequisite.id),
    }
    .insert(&db)
    .await;
    assert!(duplicate.is_err());

    Ok(())
}
