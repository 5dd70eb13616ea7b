//! Service health for load balancers and the inspection client.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use heatlog_core::annotation::AnnotationPolicy;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `unavailable` when the database cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// How saves treat invalid annotations on this instance.
    pub annotation_policy: AnnotationPolicy,
}

/// GET /health
///
/// Every endpoint except this one needs the database, so an unreachable
/// store answers 503 and the instance drops out of rotation.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = match heatlog_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            false
        }
    };

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        annotation_policy: state.config.annotation_policy,
    };
    (code, Json(body))
}

/// Mounted at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
