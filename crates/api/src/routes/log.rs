//! Route definitions for the `/logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::log;
use crate::state::AppState;

/// Routes mounted at `/logs`.
///
/// ```text
/// GET    /{log_id}               -> get_by_id
/// GET    /{log_id}/annotations   -> list_annotations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{log_id}", get(log::get_by_id))
        .route("/{log_id}/annotations", get(log::list_annotations))
}
