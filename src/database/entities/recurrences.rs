use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recurrence payload, one row per action with `kind = recurrent`.
/// Shares the action's primary key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recurrences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub action_id: i32,
    pub frequency: Frequency,
    pub active: bool,
    pub until: Option<ChronoDateTimeUtc>,
    pub count: i32,
}

/// Repetition period codes, stored as a single character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(1))")]
pub enum Frequency {
    #[sea_orm(string_value = "d")]
    #[serde(rename = "d")]
    Daily,
    #[sea_orm(string_value = "w")]
    #[serde(rename = "w")]
    Weekly,
    #[sea_orm(string_value = "m")]
    #[serde(rename = "m")]
    Monthly,
    #[sea_orm(string_value = "y")]
    #[serde(rename = "y")]
    Yearly,
}

impl Frequency {
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
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
    Actions,
}

impl Related<super::actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
