use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dependency edge between two actions: `action_id` waits on
/// `depends_on_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "action_dependencies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub action_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub depends_on_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::actions::Entity",
        from = "Column::ActionId",
        to = "super::actions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    DependentAction,
    #[sea_orm(
        belongs_to = "super::actions::Entity",
        from = "Column::DependsOnId",
        to = "super::actions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Prerequisite,
}

impl ActiveModelBehavior for ActiveModel {}
