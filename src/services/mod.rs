pub mod action_service;
pub mod category_service;
pub mod derivation;
pub mod journal_service;
pub mod month_filter;
pub mod project_service;
pub mod slug;
pub mod validation;

pub use action_service::*;
pub use category_service::*;
pub use journal_service::*;
pub use month_filter::*;
pub use project_service::*;
pub use validation::*;
