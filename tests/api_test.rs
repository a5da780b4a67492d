//! API integration tests
//!
//! Tests for the back-office REST endpoints: reference data, actions
//! with their subtype payloads, dependencies, journals and filters.

use actiondesk::database::setup_database;
use actiondesk::server::app::create_app;
use anyhow::Result;
use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::Database;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

/// Create a test server backed by a file database
async fn setup_test_server() -> Result<(TestServer, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    let app = create_app(db, Some("*")).await?;
    let server = TestServer::new(app)?;

    Ok((server, temp_file))
}

async fn create_category(server: &TestServer, name: &str) -> Value {
    let response = server
        .post("/api/v1/categories")
        .json(&json!({ "name": name }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

async fn create_project(server: &TestServer, category_id: i64, name: &str) -> Value {
    let response = server
        .post("/api/v1/projects")
        .json(&json!({ "category_id": category_id, "name": name }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

async fn create_action(server: &TestServer, payload: Value) -> Value {
    let response = server.post("/api/v1/actions").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "actiondesk");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_category_api() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    // Slug is derived from the name when not supplied
    let category = create_category(&server, "Personal").await;
    assert_eq!(category["name"], "Personal");
    assert_eq!(category["slug"], "personal");
    let category_id = category["id"].as_i64().unwrap();

    // List rows carry the comma-joined project names
    create_project(&server, category_id, "Home").await;
    create_project(&server, category_id, "Admin").await;

    let response = server.get("/api/v1/categories").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["project_names"], "Admin, Home");

    // Reference data is append-only
    let response = server
        .put(&format!("/api/v1/categories/{}", category_id))
        .json(&json!({ "name": "Renamed" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .delete(&format!("/api/v1/categories/{}", category_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // Names and slugs are unique
    let response = server
        .post("/api/v1/categories")
        .json(&json!({ "name": "Personal" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    // Blank names are rejected before hitting the database
    let response = server
        .post("/api/v1/categories")
        .json(&json!({ "name": "   " }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["field"], "name");

    Ok(())
}

#[tokio::test]
async fn test_project_api() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let category = create_category(&server, "Personal").await;
    let category_id = category["id"].as_i64().unwrap();

    // Project slugs embed the category name
    let project = create_project(&server, category_id, "Home").await;
    assert_eq!(project["slug"], "personal__home");

    // Unknown category is a validation error, not a 500
    let response = server
        .post("/api/v1/projects")
        .json(&json!({ "category_id": 9999, "name": "Orphan" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // Search matches the project or its category
    create_project(&server, category_id, "Garden").await;
    let response = server.get("/api/v1/projects?search=gard").await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Garden");
    assert_eq!(rows[0]["category_name"], "Personal");

    let response = server.get("/api/v1/projects?search=Personal").await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 2);

    // Append-only, same as categories
    let project_id = project["id"].as_i64().unwrap();
    let response = server
        .delete(&format!("/api/v1/projects/{}", project_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn test_action_name_and_slug_derivation() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let category = create_category(&server, "Personal").await;
    let project = create_project(&server, category["id"].as_i64().unwrap(), "Home").await;
    let project_id = project["id"].as_i64().unwrap();

    let action = create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "Buy milk",
            "description": "Semi-skimmed"
        }),
    )
    .await;

    // Defaults: regular priority, fuzzy status, plain action
    assert_eq!(action["kind"], "action");
    assert_eq!(action["priority"], "⇅");
    assert_eq!(action["status"], "A");
    assert_eq!(action["name"], "⇅ Home – Buy milk");
    assert_eq!(action["slug"], "home__buy-milk");

    // The log book starts with the creation entry
    let action_id = action["id"].as_i64().unwrap();
    let response = server
        .get(&format!("/api/v1/actions/{}/logs", action_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let logs: Vec<Value> = response.json();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["number"], 1);
    assert_eq!(logs[0]["content"], "Creation of the action");
    assert!(logs[0]["date"].is_string());

    // A supplied slug wins over derivation
    let custom = create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "Buy bread",
            "description": "Rye",
            "slug": "errands-bread"
        }),
    )
    .await;
    assert_eq!(custom["slug"], "errands-bread");

    Ok(())
}

#[tokio::test]
async fn test_action_update_keeps_name_and_slug() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let category = create_category(&server, "Personal").await;
    let project = create_project(&server, category["id"].as_i64().unwrap(), "Home").await;
    let project_id = project["id"].as_i64().unwrap();

    let action = create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "Buy milk",
            "description": "Semi-skimmed"
        }),
    )
    .await;
    let action_id = action["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/v1/actions/{}", action_id))
        .json(&json!({
            "project_id": project_id,
            "label": "Buy oat milk",
            "priority": "↑",
            "status": "C",
            "description": "Barista edition",
            "deadline": "2024-02-01"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let updated: Value = response.json();
    assert_eq!(updated["label"], "Buy oat milk");
    assert_eq!(updated["priority"], "↑");
    assert_eq!(updated["status"], "C");
    assert_eq!(updated["deadline"], "2024-02-01");
    // Identity fields never follow later edits
    assert_eq!(updated["name"], "⇅ Home – Buy milk");
    assert_eq!(updated["slug"], "home__buy-milk");

    Ok(())
}

#[tokio::test]
async fn test_event_and_recurrence_payloads() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let category = create_category(&server, "Personal").await;
    let project = create_project(&server, category["id"].as_i64().unwrap(), "Health").await;
    let project_id = project["id"].as_i64().unwrap();

    // An event payload fixes the kind at creation
    let event_action = create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "Dentist",
            "description": "Yearly checkup",
            "event": {
                "location": "Main St 1",
                "departure_time": "08:30:00",
                "send_reminder": true
            }
        }),
    )
    .await;
    assert_eq!(event_action["kind"], "event");
    let event_id = event_action["id"].as_i64().unwrap();

    let response = server.get(&format!("/api/v1/actions/{}", event_id)).await;
    let detail: Value = response.json();
    assert_eq!(detail["type"], "event");
    assert_eq!(detail["event"]["location"], "Main St 1");
    assert_eq!(detail["event"]["send_reminder"], true);
    assert!(detail["recurrence"].is_null());

    // A recurrence payload makes a recurrent action
    let recurrent_action = create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "Water plants",
            "description": "All rooms",
            "recurrence": { "frequency": "w", "active": true, "count": 4 }
        }),
    )
    .await;
    assert_eq!(recurrent_action["kind"], "recurrent");
    let recurrent_id = recurrent_action["id"].as_i64().unwrap();

    let response = server
        .get(&format!("/api/v1/actions/{}", recurrent_id))
        .await;
    let detail: Value = response.json();
    assert_eq!(detail["type"], "recurrent action");
    assert_eq!(detail["recurrence"]["frequency"], "w");
    assert_eq!(detail["recurrence"]["count"], 4);

    // Editing may update the matching payload
    let response = server
        .put(&format!("/api/v1/actions/{}", event_id))
        .json(&json!({
            "project_id": project_id,
            "label": "Dentist",
            "priority": "⇅",
            "status": "C",
            "description": "Yearly checkup",
            "event": { "location": "Side St 2", "send_reminder": false }
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get(&format!("/api/v1/actions/{}", event_id)).await;
    let detail: Value = response.json();
    assert_eq!(detail["event"]["location"], "Side St 2");
    assert_eq!(detail["event"]["send_reminder"], false);

    // ... but never swap the kind
    let response = server
        .put(&format!("/api/v1/actions/{}", event_id))
        .json(&json!({
            "project_id": project_id,
            "label": "Dentist",
            "priority": "⇅",
            "status": "C",
            "description": "Yearly checkup",
            "recurrence": { "frequency": "m", "active": true, "count": 1 }
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // Kind filter on the list view
    let response = server.get("/api/v1/actions?kind=event").await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["type"], "event");

    Ok(())
}

#[tokio::test]
async fn test_dependency_status_column() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let category = create_category(&server, "Personal").await;
    let project = create_project(&server, category["id"].as_i64().unwrap(), "Home").await;
    let project_id = project["id"].as_i64().unwrap();

    // One open prerequisite, one dropped one
    let open_dep = create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "Pay bill",
            "status": "D",
            "description": "Electricity"
        }),
    )
    .await;
    let dropped_dep = create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "Old chore",
            "status": "V",
            "description": "Abandoned"
        }),
    )
    .await;
    let dependent = create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "Clean house",
            "description": "Spring cleaning",
            "dependencies": [open_dep["id"], dropped_dep["id"]]
        }),
    )
    .await;

    let response = server
        .get(&format!("/api/v1/actions/{}", dependent["id"]))
        .await;
    let detail: Value = response.json();
    assert_eq!(detail["dependency_status"], "1/12//0");
    assert_eq!(detail["dependency_ids"].as_array().unwrap().len(), 2);

    // The prerequisites each carry one subordinate
    let response = server
        .get(&format!("/api/v1/actions/{}", open_dep["id"]))
        .await;
    let detail: Value = response.json();
    assert_eq!(detail["dependency_status"], "0/00//1");

    // Same figures on the list view
    let response = server.get("/api/v1/actions").await;
    let rows: Vec<Value> = response.json();
    let row = rows
        .iter()
        .find(|row| row["label"] == "Clean house")
        .unwrap();
    assert_eq!(row["dependency_status"], "1/12//0");

    // Replacing the edge set updates the figures
    let response = server
        .put(&format!("/api/v1/actions/{}/dependencies", dependent["id"]))
        .json(&json!({ "dependencies": [open_dep["id"]] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let ids: Vec<Value> = response.json();
    assert_eq!(ids.len(), 1);

    let response = server
        .get(&format!("/api/v1/actions/{}", dependent["id"]))
        .await;
    let detail: Value = response.json();
    assert_eq!(detail["dependency_status"], "1/01//0");

    // Unknown prerequisites are rejected
    let response = server
        .put(&format!("/api/v1/actions/{}/dependencies", dependent["id"]))
        .json(&json!({ "dependencies": [9999] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_month_filter() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let category = create_category(&server, "Personal").await;
    let project = create_project(&server, category["id"].as_i64().unwrap(), "Home").await;
    let project_id = project["id"].as_i64().unwrap();

    create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "January deadline",
            "description": "x",
            "deadline": "2024-01-15"
        }),
    )
    .await;
    create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "November deadline",
            "description": "x",
            "deadline": "2023-11-02"
        }),
    )
    .await;
    create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "No deadline",
            "description": "x"
        }),
    )
    .await;

    // Options list only months present in the data, most recent first
    let response = server.get("/api/v1/actions/months?field=deadline").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let months: Vec<Value> = response.json();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["value"], "01-2024");
    assert_eq!(months[0]["label"], "January 2024");
    assert_eq!(months[1]["value"], "11-2023");
    assert_eq!(months[1]["label"], "November 2023");

    // Filtering narrows to the calendar month
    let response = server.get("/api/v1/actions?deadline_month=01-2024").await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["label"], "January deadline");

    // A malformed month value leaves the list unchanged
    let response = server.get("/api/v1/actions?deadline_month=bogus").await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 3);

    // Unknown field names are rejected
    let response = server.get("/api/v1/actions/months?field=bogus").await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_action_search_and_filters() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let personal = create_category(&server, "Personal").await;
    let work = create_category(&server, "Work").await;
    let home = create_project(&server, personal["id"].as_i64().unwrap(), "Home").await;
    let office = create_project(&server, work["id"].as_i64().unwrap(), "Office").await;

    create_action(
        &server,
        json!({
            "project_id": home["id"],
            "label": "Buy milk",
            "description": "x",
            "estimate": 2,
            "estimate_unit": "h"
        }),
    )
    .await;
    create_action(
        &server,
        json!({
            "project_id": office["id"],
            "label": "File report",
            "description": "x"
        }),
    )
    .await;

    // Search over the label
    let response = server.get("/api/v1/actions?search=milk").await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["label"], "Buy milk");
    assert_eq!(rows[0]["project"], "Home");
    assert_eq!(rows[0]["project_category"], "Personal");
    assert_eq!(rows[0]["estimate_label"], "2 hour(s)");
    assert_eq!(rows[0]["duration_label"], "-");

    // Search over the category name
    let response = server.get("/api/v1/actions?search=Work").await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["label"], "File report");

    // Category and project filters
    let response = server
        .get(&format!("/api/v1/actions?category={}", personal["id"]))
        .await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);

    let response = server
        .get(&format!("/api/v1/actions?project={}", office["id"]))
        .await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);

    // Unit filter
    let response = server.get("/api/v1/actions?estimate_unit=h").await;
    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["label"], "Buy milk");

    Ok(())
}

#[tokio::test]
async fn test_journal_numbering_via_api() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let category = create_category(&server, "Personal").await;
    let project = create_project(&server, category["id"].as_i64().unwrap(), "Home").await;
    let action = create_action(
        &server,
        json!({
            "project_id": project["id"],
            "label": "Buy milk",
            "description": "x"
        }),
    )
    .await;
    let action_id = action["id"].as_i64().unwrap();

    // Notes number from 1 per action
    let response = server
        .post(&format!("/api/v1/actions/{}/notes", action_id))
        .json(&json!({ "content": "first" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let first: Value = response.json();
    assert_eq!(first["number"], 1);

    let response = server
        .post(&format!("/api/v1/actions/{}/notes", action_id))
        .json(&json!({ "content": "second" }))
        .await;
    let second: Value = response.json();
    assert_eq!(second["number"], 2);

    // Numbers come from the maximum, so deleting an early entry does
    // not shift later ones
    let response = server
        .delete(&format!("/api/v1/notes/{}", first["id"]))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .post(&format!("/api/v1/actions/{}/notes", action_id))
        .json(&json!({ "content": "third" }))
        .await;
    let third: Value = response.json();
    assert_eq!(third["number"], 3);

    // Steps keep their own sequence
    let response = server
        .post(&format!("/api/v1/actions/{}/steps", action_id))
        .json(&json!({ "planned_on": "2024-01-10T09:00:00Z", "content": "start" }))
        .await;
    let step: Value = response.json();
    assert_eq!(step["number"], 1);

    // The log book already holds the creation entry
    let response = server
        .post(&format!("/api/v1/actions/{}/logs", action_id))
        .json(&json!({ "date": "2024-01-11T10:00:00Z", "content": "did some work" }))
        .await;
    let log: Value = response.json();
    assert_eq!(log["number"], 2);

    // Another action starts its sequences from scratch
    let other = create_action(
        &server,
        json!({
            "project_id": project["id"],
            "label": "Buy bread",
            "description": "x"
        }),
    )
    .await;
    let response = server
        .post(&format!("/api/v1/actions/{}/notes", other["id"]))
        .json(&json!({ "content": "unrelated" }))
        .await;
    let note: Value = response.json();
    assert_eq!(note["number"], 1);

    Ok(())
}

#[tokio::test]
async fn test_action_validation_errors() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let category = create_category(&server, "Personal").await;
    let project = create_project(&server, category["id"].as_i64().unwrap(), "Home").await;
    let project_id = project["id"].as_i64().unwrap();

    // Label over 48 characters
    let response = server
        .post("/api/v1/actions")
        .json(&json!({
            "project_id": project_id,
            "label": "x".repeat(49),
            "description": "too long"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["field"], "label");

    // Blank description
    let response = server
        .post("/api/v1/actions")
        .json(&json!({
            "project_id": project_id,
            "label": "No description",
            "description": "  "
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // Estimate outside the small integer range
    let response = server
        .post("/api/v1/actions")
        .json(&json!({
            "project_id": project_id,
            "label": "Big estimate",
            "description": "x",
            "estimate": 40000,
            "estimate_unit": "h"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // An action cannot be an event and a recurrent action at once
    let response = server
        .post("/api/v1/actions")
        .json(&json!({
            "project_id": project_id,
            "label": "Confused",
            "description": "x",
            "event": { "location": "Here" },
            "recurrence": { "frequency": "d", "active": true, "count": 1 }
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["field"], "kind");

    // Event location over 64 characters
    let response = server
        .post("/api/v1/actions")
        .json(&json!({
            "project_id": project_id,
            "label": "Far away",
            "description": "x",
            "event": { "location": "x".repeat(65) }
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // Unknown project
    let response = server
        .post("/api/v1/actions")
        .json(&json!({
            "project_id": 9999,
            "label": "Orphan",
            "description": "x"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // Duplicate explicit slug
    create_action(
        &server,
        json!({
            "project_id": project_id,
            "label": "First",
            "description": "x",
            "slug": "shared-slug"
        }),
    )
    .await;
    let response = server
        .post("/api/v1/actions")
        .json(&json!({
            "project_id": project_id,
            "label": "Second",
            "description": "x",
            "slug": "shared-slug"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn test_action_delete_cascades() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let category = create_category(&server, "Personal").await;
    let project = create_project(&server, category["id"].as_i64().unwrap(), "Home").await;
    let action = create_action(
        &server,
        json!({
            "project_id": project["id"],
            "label": "Dentist",
            "description": "x",
            "event": { "location": "Main St 1" }
        }),
    )
    .await;
    let action_id = action["id"].as_i64().unwrap();

    server
        .post(&format!("/api/v1/actions/{}/notes", action_id))
        .json(&json!({ "content": "bring insurance card" }))
        .await;

    let response = server
        .delete(&format!("/api/v1/actions/{}", action_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/v1/actions/{}", action_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server
        .get(&format!("/api/v1/actions/{}/notes", action_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_permission_matrix_endpoint() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server.get("/api/v1/admin/permissions").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let rows: Vec<Value> = response.json();
    assert_eq!(rows.len(), 8);

    let categories = rows
        .iter()
        .find(|row| row["entity"] == "categories")
        .unwrap();
    assert_eq!(categories["add"], true);
    assert_eq!(categories["change"], false);
    assert_eq!(categories["delete"], false);

    let actions = rows.iter().find(|row| row["entity"] == "actions").unwrap();
    assert_eq!(actions["change"], true);
    assert_eq!(actions["delete"], true);

    Ok(())
}
