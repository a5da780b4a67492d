pub mod action_dependencies;
pub mod actions;
pub mod categories;
pub mod events;
pub mod logs;
pub mod notes;
pub mod projects;
pub mod recurrences;
pub mod steps;
