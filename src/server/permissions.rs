//! Static admin permission policy.
//!
//! Categories and projects are reference data: they can be browsed and
//! added to, never edited or deleted. Everything hanging off an action
//! is fully editable.

use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};

/// Entities the back office manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminEntity {
    Categories,
    Projects,
    Actions,
    Events,
    Recurrences,
    Notes,
    Steps,
    Logs,
}

impl AdminEntity {
    pub const ALL: [AdminEntity; 8] = [
        AdminEntity::Categories,
        AdminEntity::Projects,
        AdminEntity::Actions,
        AdminEntity::Events,
        AdminEntity::Recurrences,
        AdminEntity::Notes,
        AdminEntity::Steps,
        AdminEntity::Logs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AdminEntity::Categories => "categories",
            AdminEntity::Projects => "projects",
            AdminEntity::Actions => "actions",
            AdminEntity::Events => "events",
            AdminEntity::Recurrences => "recurrences",
            AdminEntity::Notes => "notes",
            AdminEntity::Steps => "steps",
            AdminEntity::Logs => "logs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    View,
    Add,
    Change,
    Delete,
}

impl AdminAction {
    pub fn name(self) -> &'static str {
        match self {
            AdminAction::View => "view",
            AdminAction::Add => "add",
            AdminAction::Change => "change",
            AdminAction::Delete => "delete",
        }
    }
}

/// Per-entity grants. `module` gates whether the entity shows up in the
/// back office at all.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntityPermissions {
    pub module: bool,
    pub view: bool,
    pub add: bool,
    pub change: bool,
    pub delete: bool,
}

pub fn permissions_for(entity: AdminEntity) -> EntityPermissions {
    match entity {
        AdminEntity::Categories | AdminEntity::Projects => EntityPermissions {
            module: true,
            view: true,
            add: true,
            change: false,
            delete: false,
        },
        _ => EntityPermissions {
            module: true,
            view: true,
            add: true,
            change: true,
            delete: true,
        },
    }
}

/// Check a grant before touching the service layer.
pub fn require(entity: AdminEntity, action: AdminAction) -> ServiceResult<()> {
    let grants = permissions_for(entity);
    let granted = match action {
        AdminAction::View => grants.view,
        AdminAction::Add => grants.add,
        AdminAction::Change => grants.change,
        AdminAction::Delete => grants.delete,
    };
    if granted {
        Ok(())
    } else {
        Err(ServiceError::PermissionDenied {
            entity: entity.name(),
            action: action.name(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissionRow {
    pub entity: &'static str,
    #[serde(flatten)]
    pub permissions: EntityPermissions,
}

/// The full policy, one row per entity.
pub fn matrix() -> Vec<PermissionRow> {
    AdminEntity::ALL
        .iter()
        .map(|&entity| PermissionRow {
            entity: entity.name(),
            permissions: permissions_for(entity),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_data_is_append_only() {
        for entity in [AdminEntity::Categories, AdminEntity::Projects] {
            assert!(require(entity, AdminAction::View).is_ok());
            assert!(require(entity, AdminAction::Add).is_ok());
            assert!(require(entity, AdminAction::Change).is_err());
            assert!(require(entity, AdminAction::Delete).is_err());
        }
    }

    #[test]
    fn action_entities_are_fully_editable() {
        for entity in [
            AdminEntity::Actions,
            AdminEntity::Events,
            AdminEntity::Recurrences,
            AdminEntity::Notes,
            AdminEntity::Steps,
            AdminEntity::Logs,
        ] {
            for action in [
                AdminAction::View,
                AdminAction::Add,
                AdminAction::Change,
                AdminAction::Delete,
            ] {
                assert!(require(entity, action).is_ok());
            }
        }
    }

    #[test]
    fn matrix_covers_every_entity() {
        let rows = matrix();
        assert_eq!(rows.len(), AdminEntity::ALL.len());
        assert!(rows.iter().all(|row| row.permissions.module));
    }
}
