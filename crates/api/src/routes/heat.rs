//! Route definitions for the `/heats` resource.
//!
//! Also nests the heat-scoped log routes under `/heats/{heat}/logs`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{heat, log};
use crate::state::AppState;

/// Routes mounted at `/heats`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create
/// GET    /{heat}                 -> get_aggregate
/// PUT    /{heat}                 -> update
///
/// GET    /{heat}/logs            -> list_by_heat
/// POST   /{heat}/logs            -> save_derived
/// PUT    /{heat}/logs/{log_id}   -> reconcile
/// ```
pub fn router() -> Router<AppState> {
    let log_routes = Router::new()
        .route("/", get(log::list_by_heat).post(log::save_derived))
        .route("/{log_id}", put(log::reconcile));

    Router::new()
        .route("/", get(heat::list).post(heat::create))
        .route("/{heat}", get(heat::get_aggregate).put(heat::update))
        .nest("/{heat}/logs", log_routes)
}
