pub mod annotation;
pub mod health;
pub mod heat;
pub mod log;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /heats                                  list, create
/// /heats/{heat}                           aggregate (heat -> logs -> annotations), update
/// /heats/{heat}/logs                      list (?include_annotations), save with derived id
/// /heats/{heat}/logs/{log_id}             reconcile log + annotations (PUT)
///
/// /logs/{log_id}                          log with annotations
/// /logs/{log_id}/annotations              annotations ordered by position
///
/// /annotations                            create (POST)
/// /annotations/{id}                       delete
/// ```
///
/// `{heat}` is a heat number (`A` + 7 digits) or an internal heat id; the
/// aggregate and update routes accept heat numbers only.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/heats", heat::router())
        .nest("/logs", log::router())
        .nest("/annotations", annotation::router())
}
