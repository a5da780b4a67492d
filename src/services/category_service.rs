use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

use crate::database::entities::{categories, projects};
use crate::error::{ServiceError, ServiceResult};
use crate::services::derivation;
use crate::services::validation::ValidationService;

const NAME_MAX: usize = 16;
const SLUG_MAX: usize = 32;

/// List row for the category table: the category itself plus the
/// comma-joined names of its projects.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub project_names: String,
}

#[derive(Clone)]
pub struct CategoryService {
    db: DatabaseConnection,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a category, deriving the slug from the name when none is
    /// supplied. Categories never change after creation.
    pub async fn create(&self, name: &str, slug: Option<&str>) -> ServiceResult<categories::Model> {
        let name = ValidationService::required_text("name", name, NAME_MAX)?;
        let slug = match ValidationService::optional_text("slug", slug, SLUG_MAX)? {
            Some(slug) => slug,
            None => derivation::category_slug(&name),
        };
        if slug.is_empty() {
            return Err(ServiceError::validation(
                "slug",
                "cannot be derived from this name",
            ));
        }

        let category = categories::ActiveModel {
            name: Set(name),
            slug: Set(slug),
            ..Default::default()
        };

        Ok(category.insert(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> ServiceResult<categories::Model> {
        categories::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound("category"))
    }

    /// Categories ordered by name, optionally narrowed by a substring
    /// search over the name.
    pub async fn list(&self, search: Option<&str>) -> ServiceResult<Vec<CategoryRow>> {
        let mut query = categories::Entity::find();
        if let Some(q) = search.map(str::trim).filter(|q| !q.is_empty()) {
            query = query.filter(categories::Column::Name.contains(q));
        }

        let rows = query
            .find_with_related(projects::Entity)
            .order_by_asc(categories::Column::Name)
            .order_by_asc(projects::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, projects)| CategoryRow {
                id: category.id,
                name: category.name,
                slug: category.slug,
                project_names: projects
                    .iter()
                    .map(|project| project.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect())
    }
}
