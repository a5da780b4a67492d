use axum::response::Json;

use crate::server::permissions::{self, PermissionRow};

/// The static permission policy, for clients that render the back
/// office chrome.
pub async fn permission_matrix() -> Json<Vec<PermissionRow>> {
    Json(permissions::matrix())
}
