use crate::database::entities::actions::Priority;
use crate::services::slug::slugify;

/// Create-time identifier derivation. These run once, inside the create
/// transaction; updates never re-derive a name or slug.

pub fn category_slug(name: &str) -> String {
    slugify(name)
}

pub fn project_slug(category_name: &str, name: &str) -> String {
    slugify(&format!("{}__{}", category_name, name))
}

/// Actions are always named `{priority code} {project name} – {label}`,
/// overwriting whatever the caller sent.
pub fn action_name(priority: Priority, project_name: &str, label: &str) -> String {
    format!("{} {} – {}", priority.code(), project_name, label)
}

pub fn action_slug(project_name: &str, label: &str) -> String {
    slugify(&format!("{}__{}", project_name, label))
}
