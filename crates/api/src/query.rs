//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /heats/{heat}/logs`.
#[derive(Debug, Deserialize)]
pub struct LogListParams {
    /// Embed each log's annotations (default: `true`).
    pub include_annotations: Option<bool>,
}
