use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{actions, admin, categories, health, journal, projects};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState { db };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        // API v1 routes
        .nest("/api/v1", api_v1_routes())
        // Add middleware
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Category routes
        .route("/categories", get(categories::list_categories))
        .route("/categories", post(categories::create_category))
        .route("/categories/:id", get(categories::get_category))
        .route("/categories/:id", put(categories::update_category))
        .route("/categories/:id", delete(categories::delete_category))
        // Project routes
        .route("/projects", get(projects::list_projects))
        .route("/projects", post(projects::create_project))
        .route("/projects/:id", get(projects::get_project))
        .route("/projects/:id", put(projects::update_project))
        .route("/projects/:id", delete(projects::delete_project))
        // Action routes; /actions/months is static and must not be
        // shadowed by the :id matcher
        .route("/actions", get(actions::list_actions))
        .route("/actions", post(actions::create_action))
        .route("/actions/months", get(actions::list_months))
        .route("/actions/:id", get(actions::get_action))
        .route("/actions/:id", put(actions::update_action))
        .route("/actions/:id", delete(actions::delete_action))
        .route("/actions/:id/dependencies", put(actions::set_dependencies))
        // Notes
        .route("/actions/:id/notes", get(journal::list_notes))
        .route("/actions/:id/notes", post(journal::create_note))
        .route("/notes/:id", put(journal::update_note))
        .route("/notes/:id", delete(journal::delete_note))
        // Steps
        .route("/actions/:id/steps", get(journal::list_steps))
        .route("/actions/:id/steps", post(journal::create_step))
        .route("/steps/:id", put(journal::update_step))
        .route("/steps/:id", delete(journal::delete_step))
        // Log book
        .route("/actions/:id/logs", get(journal::list_logs))
        .route("/actions/:id/logs", post(journal::create_log))
        .route("/logs/:id", put(journal::update_log))
        .route("/logs/:id", delete(journal::delete_log))
        // Admin metadata
        .route("/admin/permissions", get(admin::permission_matrix))
}
