use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;

use crate::database::entities::{categories, projects};
use crate::error::{ServiceError, ServiceResult};
use crate::services::derivation;
use crate::services::validation::ValidationService;

const NAME_MAX: usize = 32;
const SLUG_MAX: usize = 32;

/// List row for the project table, carrying the owning category's name.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow {
    pub id: i32,
    pub category_id: i32,
    pub category_name: String,
    pub name: String,
    pub slug: String,
}

#[derive(Clone)]
pub struct ProjectService {
    db: DatabaseConnection,
}

impl ProjectService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a project under a category. The slug defaults to
    /// `slugify(category.name + "__" + name)`. Projects never change
    /// after creation.
    pub async fn create(
        &self,
        category_id: i32,
        name: &str,
        slug: Option<&str>,
    ) -> ServiceResult<projects::Model> {
        let name = ValidationService::required_text("name", name, NAME_MAX)?;
        let supplied_slug = ValidationService::optional_text("slug", slug, SLUG_MAX)?;

        let category = categories::Entity::find_by_id(category_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::validation("category_id", "unknown category"))?;

        let slug = match supplied_slug {
            Some(slug) => slug,
            None => derivation::project_slug(&category.name, &name),
        };
        if slug.is_empty() {
            return Err(ServiceError::validation(
                "slug",
                "cannot be derived from this name",
            ));
        }

        let project = projects::ActiveModel {
            category_id: Set(category.id),
            name: Set(name),
            slug: Set(slug),
            ..Default::default()
        };

        Ok(project.insert(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> ServiceResult<projects::Model> {
        projects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("project"))
    }

    /// Projects ordered by name; the search matches the project name or
    /// the owning category's name.
    pub async fn list(&self, search: Option<&str>) -> ServiceResult<Vec<ProjectRow>> {
        let mut query = projects::Entity::find().find_also_related(categories::Entity);
        if let Some(q) = search.map(str::trim).filter(|q| !q.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(projects::Column::Name.contains(q))
                    .add(categories::Column::Name.contains(q)),
            );
        }

        let rows = query
            .order_by_asc(projects::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(project, category)| ProjectRow {
                id: project.id,
                category_id: project.category_id,
                category_name: category.map(|c| c.name).unwrap_or_default(),
                name: project.name,
                slug: project.slug,
            })
            .collect())
    }
}
