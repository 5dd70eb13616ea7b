//! Response bodies that are not a bare row.

use heatlog_db::models::log::LogWithAnnotations;
use serde::Serialize;

/// Body returned by the log save endpoints.
#[derive(Debug, Serialize)]
pub struct SavedLogResponse {
    /// Always `"Saved"`.
    pub message: &'static str,
    /// `true` if the log row did not exist before this call.
    pub created: bool,
    /// Submitted annotations that were not stored (lenient policy only).
    pub skipped: usize,
    /// The stored log with its annotations ordered by position.
    pub data: LogWithAnnotations,
}
