//! Log identifier rules.

use crate::error::CoreError;

/// Maximum length of a caller-supplied log id.
pub const MAX_LOG_ID_LENGTH: usize = 100;

/// Derive the id of a log submitted without an explicit one.
///
/// Logs posted against a heat are keyed `{heat_number}-{log_number}` so that
/// re-posting the same log number updates the existing row.
pub fn derive_log_id(heat_number: &str, log_number: i32) -> String {
    format!("{heat_number}-{log_number}")
}

/// Validate a log id taken from a URL path or request body.
pub fn validate_log_id(log_id: &str) -> Result<(), CoreError> {
    if log_id.trim().is_empty() {
        return Err(CoreError::Validation("Log id must not be empty".to_string()));
    }
    if log_id.len() > MAX_LOG_ID_LENGTH {
        return Err(CoreError::Validation(format!(
            "Log id exceeds maximum length of {MAX_LOG_ID_LENGTH} characters (got {})",
            log_id.len()
        )));
    }
    if log_id.chars().any(char::is_control) {
        return Err(CoreError::Validation(
            "Log id must not contain control characters".to_string(),
        ));
    }
    Ok(())
}

/// Log numbers order logs within a heat and must not be negative.
pub fn validate_log_number(log_number: i32) -> Result<(), CoreError> {
    if log_number < 0 {
        return Err(CoreError::Validation(format!(
            "log_number must not be negative, got {log_number}"
        )));
    }
    Ok(())
}
