//! Annotation field rules and the reconciliation policy.
//!
//! Annotations are never edited in place: a log reconciliation deletes the
//! whole set and reinserts the submitted list. [`AnnotationPolicy`] decides
//! what happens when one entry of that list is unusable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of an annotation `type` tag.
pub const MAX_ANNOTATION_TYPE_LENGTH: usize = 64;

/// Maximum length of the free-text `note` and `comment` fields.
pub const MAX_NOTE_LENGTH: usize = 2_000;

/// Maximum length of provenance strings (inspector, user name/role/color, hash).
pub const MAX_PROVENANCE_LENGTH: usize = 200;

/// Maximum number of annotations accepted in one reconciliation.
pub const MAX_ANNOTATIONS_PER_LOG: usize = 5_000;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// How a reconciliation treats annotations that cannot be stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationPolicy {
    /// Validate the full list up front; any bad entry or failed insert
    /// rejects the whole reconciliation and leaves the log untouched.
    #[default]
    Strict,
    /// Skip bad entries and failed inserts, logging each one, and commit
    /// the rest.
    Lenient,
}

impl AnnotationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl FromStr for AnnotationPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(CoreError::Validation(format!(
                "Invalid annotation policy '{other}'. Must be one of: strict, lenient"
            ))),
        }
    }
}

impl fmt::Display for AnnotationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate an annotation position: required and finite.
pub fn validate_position(position: Option<f64>) -> Result<f64, CoreError> {
    match position {
        None => Err(CoreError::Validation("position is required".to_string())),
        Some(p) if !p.is_finite() => Err(CoreError::Validation(
            "position must be a finite number".to_string(),
        )),
        Some(p) => Ok(p),
    }
}

/// Validate an annotation type tag: required, non-blank, bounded.
pub fn validate_annotation_type(annotation_type: Option<&str>) -> Result<&str, CoreError> {
    let value = annotation_type
        .ok_or_else(|| CoreError::Validation("type is required".to_string()))?;
    if value.trim().is_empty() {
        return Err(CoreError::Validation("type must not be empty".to_string()));
    }
    if value.contains('\0') {
        return Err(CoreError::Validation(
            "type must not contain NUL bytes".to_string(),
        ));
    }
    if value.len() > MAX_ANNOTATION_TYPE_LENGTH {
        return Err(CoreError::Validation(format!(
            "type exceeds maximum length of {MAX_ANNOTATION_TYPE_LENGTH} characters (got {})",
            value.len()
        )));
    }
    Ok(value)
}

/// Parse an annotation id taken from a URL path.
pub fn parse_annotation_id(raw: &str) -> Result<DbId, CoreError> {
    raw.parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::Validation(format!("'{raw}' is not a valid annotation id")))
}

/// Validate the size of a submitted annotation list.
pub fn validate_annotation_count(count: usize) -> Result<(), CoreError> {
    if count > MAX_ANNOTATIONS_PER_LOG {
        return Err(CoreError::Validation(format!(
            "Too many annotations: {count} submitted, maximum is {MAX_ANNOTATIONS_PER_LOG}"
        )));
    }
    Ok(())
}
