use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The central work item. `kind` discriminates the concrete subtype; the
/// subtype payload lives in the `events` / `recurrences` table keyed by
/// this record's id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: i32,
    pub kind: ActionKind,
    pub priority: Priority,
    pub status: Status,
    pub deadline: Option<ChronoDate>,
    pub label: String,
    pub name: String,
    pub description: String,
    pub planned_on: Option<ChronoDateTimeUtc>,
    pub estimate: Option<i32>,
    pub estimate_unit: Option<TimeUnit>,
    pub duration: Option<i32>,
    pub duration_unit: Option<TimeUnit>,
    pub slug: String,
}

/// Concrete subtype discriminator, fixed at creation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[sea_orm(string_value = "action")]
    Action,
    #[sea_orm(string_value = "event")]
    Event,
    #[sea_orm(string_value = "recurrent")]
    Recurrent,
}

impl ActionKind {
    /// Display name of the concrete type, resolved from the discriminator.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Event => "event",
            Self::Recurrent => "recurrent action",
        }
    }
}

/// Priority codes. The stored value is the single arrow character; the
/// derived action name starts with it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(1))")]
pub enum Priority {
    #[sea_orm(string_value = "⇈")]
    #[serde(rename = "⇈")]
    VeryHigh,
    #[sea_orm(string_value = "↑")]
    #[serde(rename = "↑")]
    High,
    #[sea_orm(string_value = "⇅")]
    #[serde(rename = "⇅")]
    Regular,
    #[sea_orm(string_value = "↓")]
    #[serde(rename = "↓")]
    Low,
    #[sea_orm(string_value = "⇊")]
    #[serde(rename = "⇊")]
    VeryLow,
}

impl Priority {
    pub fn code(self) -> &'static str {
        match self {
            Self::VeryHigh => "⇈",
            Self::High => "↑",
            Self::Regular => "⇅",
            Self::Low => "↓",
            Self::VeryLow => "⇊",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "⇈ Very high",
            Self::High => "↑ High",
            Self::Regular => "⇅ Regular",
            Self::Low => "↓ Low",
            Self::VeryLow => "⇊ Very low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Regular
    }
}

/// Status codes. `A`–`E` walk the normal lifecycle; `V`–`Z` are the
/// dropped counterparts, most-final first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(1))")]
pub enum Status {
    #[sea_orm(string_value = "A")]
    #[serde(rename = "A")]
    Fuzzy,
    #[sea_orm(string_value = "B")]
    #[serde(rename = "B")]
    Draft,
    #[sea_orm(string_value = "C")]
    #[serde(rename = "C")]
    Planned,
    #[sea_orm(string_value = "D")]
    #[serde(rename = "D")]
    InProgress,
    #[sea_orm(string_value = "E")]
    #[serde(rename = "E")]
    Archived,
    #[sea_orm(string_value = "V")]
    #[serde(rename = "V")]
    DroppedArchived,
    #[sea_orm(string_value = "W")]
    #[serde(rename = "W")]
    DroppedInProgress,
    #[sea_orm(string_value = "X")]
    #[serde(rename = "X")]
    DroppedPlanned,
    #[sea_orm(string_value = "Y")]
    #[serde(rename = "Y")]
    DroppedDraft,
    #[sea_orm(string_value = "Z")]
    #[serde(rename = "Z")]
    DroppedFuzzy,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fuzzy => "Fuzzy",
            Self::Draft => "Draft",
            Self::Planned => "Planned",
            Self::InProgress => "In progress",
            Self::Archived => "Archived",
            Self::DroppedArchived => "Dropped (Archived)",
            Self::DroppedInProgress => "Dropped (In progress)",
            Self::DroppedPlanned => "Dropped (Planned)",
            Self::DroppedDraft => "Dropped (Draft)",
            Self::DroppedFuzzy => "Dropped (Fuzzy)",
        }
    }

    /// The two actionable/open codes counted by the dependency summary.
    pub fn is_open(self) -> bool {
        matches!(self, Self::InProgress | Self::Archived)
    }

    pub fn is_dropped(self) -> bool {
        matches!(
            self,
            Self::DroppedArchived
                | Self::DroppedInProgress
                | Self::DroppedPlanned
                | Self::DroppedDraft
                | Self::DroppedFuzzy
        )
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Fuzzy
    }
}

/// Units for the estimate and duration fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(1))")]
pub enum TimeUnit {
    #[sea_orm(string_value = "w")]
    #[serde(rename = "w")]
    Weeks,
    #[sea_orm(string_value = "d")]
    #[serde(rename = "d")]
    Days,
    #[sea_orm(string_value = "h")]
    #[serde(rename = "h")]
    Hours,
    #[sea_orm(string_value = "m")]
    #[serde(rename = "m")]
    Minutes,
}

impl TimeUnit {
    pub fn label(self) -> &'static str {
        match self {
            Self::Weeks => "week(s)",
            Self::Days => "day(s)",
            Self::Hours => "hour(s)",
            Self::Minutes => "minute(s)",
        }
    }
}

impl Model {
    /// Human readable estimate, `-` when either part is missing.
    pub fn estimate_label(&self) -> String {
        match (self.estimate, self.estimate_unit) {
            (Some(value), Some(unit)) => format!("{} {}", value, unit.label()),
            _ => "-".to_string(),
        }
    }

    /// Human readable duration, `-` when either part is missing.
    pub fn duration_label(&self) -> String {
        match (self.duration, self.duration_unit) {
            (Some(value), Some(unit)) => format!("{} {}", value, unit.label()),
            _ => "-".to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Projects,
    #[sea_orm(has_many = "super::notes::Entity")]
    Notes,
    #[sea_orm(has_many = "super::steps::Entity")]
    Steps,
    #[sea_orm(has_many = "super::logs::Entity")]
    Logs,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::notes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notes.def()
    }
}

impl Related<super::steps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Steps.def()
    }
}

impl Related<super::logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Logs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_label_needs_both_parts() {
        let mut action = Model {
            id: 1,
            project_id: 1,
            kind: ActionKind::Action,
            priority: Priority::Regular,
            status: Status::Fuzzy,
            deadline: None,
            label: "Buy milk".to_string(),
            name: "⇅ Home – Buy milk".to_string(),
            description: "errand".to_string(),
            planned_on: None,
            estimate: Some(2),
            estimate_unit: None,
            duration: None,
            duration_unit: None,
            slug: "home__buy-milk".to_string(),
        };
        assert_eq!(action.estimate_label(), "-");
        action.estimate_unit = Some(TimeUnit::Hours);
        assert_eq!(action.estimate_label(), "2 hour(s)");
        assert_eq!(action.duration_label(), "-");
    }

    #[test]
    fn status_classification() {
        assert!(Status::InProgress.is_open());
        assert!(Status::Archived.is_open());
        assert!(!Status::Planned.is_open());
        assert!(Status::DroppedFuzzy.is_dropped());
        assert!(!Status::Fuzzy.is_dropped());
    }
}
