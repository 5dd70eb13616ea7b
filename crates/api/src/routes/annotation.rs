//! Route definitions for the `/annotations` resource.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::annotation;
use crate::state::AppState;

/// Routes mounted at `/annotations`.
///
/// ```text
/// POST   /          -> create
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(annotation::create))
        .route("/{id}", delete(annotation::delete))
}
